//! Terminal chat widget talking to a running relay
//!
//! Set `CHAT_RELAY_URL` to point at the relay's chat endpoint.

use chat_relay::client::{HttpRelayClient, RelayClient};
use chat_relay::llm::RelayError;
use chat_relay::tui::{Action, App};
use crossterm::event::{self, Event};
use std::time::Duration;
use tokio::sync::mpsc;

const INPUT_POLL: Duration = Duration::from_millis(50);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = HttpRelayClient::from_env();

    let mut terminal = ratatui::init();
    let result = run(&mut terminal, client).await;
    ratatui::restore();

    result
}

async fn run(
    terminal: &mut ratatui::DefaultTerminal,
    client: HttpRelayClient,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::new();
    // Capacity 1: the session never has more than one call in flight
    let (reply_tx, mut reply_rx) = mpsc::channel::<Result<String, RelayError>>(1);

    loop {
        terminal.draw(|frame| app.render(frame))?;

        while let Ok(result) = reply_rx.try_recv() {
            app.on_relay_result(result);
        }

        if !event::poll(INPUT_POLL)? {
            continue;
        }

        if let Event::Key(key) = event::read()? {
            match app.handle_key(key) {
                Action::Quit => return Ok(()),
                Action::Send(messages) => {
                    let client = client.clone();
                    let reply_tx = reply_tx.clone();
                    tokio::spawn(async move {
                        let result = client.complete(&messages).await;
                        let _ = reply_tx.send(result).await;
                    });
                }
                Action::None => {}
            }
        }
    }
}

//! Terminal chat widget
//!
//! A scrolling message list above an input line, with conversation starters
//! on an empty conversation and a notification line for failed exchanges.
//! Relay I/O is left to the caller: key handling returns an [`Action`] and
//! the reply comes back through [`App::on_relay_result`].

use crate::llm::{ChatMessage, MessageRole, RelayError};
use crate::persona::CONVERSATION_STARTERS;
use crate::session::Session;
use crate::state_machine::{Notice, TransitionError};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const TITLE: &str = " ✨ Your Fun AI Buddy ✨ ";
const INPUT_PLACEHOLDER: &str = "Type your message here... 💬";
const BUSY_HINT: &str = "Hang on, your buddy is still typing...";

/// What the event loop should do after a key press
#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    None,
    /// Start a relay call with this transcript
    Send(Vec<ChatMessage>),
    Quit,
}

/// Line shown under the message list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Notice(Notice),
    Hint(&'static str),
}

pub struct App {
    session: Session,
    input: String,
    status: Option<Status>,
    /// Lines scrolled up from the bottom of the message list
    scroll_back: u16,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self::with_session(Session::new())
    }

    pub fn with_session(session: Session) -> Self {
        Self {
            session,
            input: String::new(),
            status: None,
            scroll_back: 0,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.kind != KeyEventKind::Press {
            return Action::None;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Action::Quit;
        }

        match key.code {
            KeyCode::Esc if self.status.is_some() => {
                self.status = None;
                Action::None
            }
            KeyCode::Esc => Action::Quit,
            KeyCode::Enter => self.submit_input(),
            KeyCode::Char(c @ '1'..='9') if self.input.is_empty() && self.session.show_starters() => {
                let index = c as usize - '1' as usize;
                self.pick_starter(index)
            }
            KeyCode::Char(c) => {
                self.input.push(c);
                Action::None
            }
            KeyCode::Backspace => {
                self.input.pop();
                Action::None
            }
            KeyCode::Up => {
                self.scroll_back = self.scroll_back.saturating_add(1);
                Action::None
            }
            KeyCode::Down => {
                self.scroll_back = self.scroll_back.saturating_sub(1);
                Action::None
            }
            KeyCode::PageUp => {
                self.scroll_back = self.scroll_back.saturating_add(10);
                Action::None
            }
            KeyCode::PageDown => {
                self.scroll_back = self.scroll_back.saturating_sub(10);
                Action::None
            }
            _ => Action::None,
        }
    }

    /// Send whatever is in the input line
    pub fn submit_input(&mut self) -> Action {
        let text = self.input.clone();
        let action = self.send(&text);
        if matches!(action, Action::Send(_)) {
            self.input.clear();
        }
        action
    }

    /// Send one of the conversation starters
    pub fn pick_starter(&mut self, index: usize) -> Action {
        match CONVERSATION_STARTERS.get(index) {
            Some(starter) if self.session.show_starters() => self.send(starter),
            _ => Action::None,
        }
    }

    fn send(&mut self, text: &str) -> Action {
        match self.session.submit(text) {
            Ok(messages) => {
                self.status = None;
                self.scroll_back = 0;
                Action::Send(messages)
            }
            Err(TransitionError::Busy) => {
                self.status = Some(Status::Hint(BUSY_HINT));
                Action::None
            }
            Err(_) => Action::None,
        }
    }

    pub fn on_relay_result(&mut self, result: Result<String, RelayError>) {
        match self.session.resolve(result) {
            Ok(Some(notice)) => self.status = Some(Status::Notice(notice)),
            Ok(None) => self.status = None,
            Err(e) => tracing::warn!(error = %e, "Dropped relay result"),
        }
        self.scroll_back = 0;
    }

    pub fn render(&self, frame: &mut Frame) {
        let chunks = Layout::vertical([
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

        self.render_messages(frame, chunks[0]);
        self.render_status(frame, chunks[1]);
        self.render_input(frame, chunks[2]);
    }

    fn message_lines(&self) -> Vec<Line<'static>> {
        let mut lines = Vec::new();

        for turn in self.session.transcript().display() {
            if turn.is_placeholder() {
                lines.push(Line::from(Span::styled(
                    "Buddy is typing...",
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::ITALIC),
                )));
                continue;
            }

            let (label, style) = match turn.role {
                MessageRole::User => ("You", Style::default().fg(Color::Cyan)),
                MessageRole::Assistant => ("Buddy", Style::default().fg(Color::Magenta)),
            };
            lines.push(Line::from(Span::styled(
                format!("{label}:"),
                style.add_modifier(Modifier::BOLD),
            )));
            lines.extend(turn.content.lines().map(|l| Line::from(l.to_string())));
            lines.push(Line::default());
        }

        if self.session.show_starters() {
            lines.push(Line::from(Span::styled(
                "Try one of these:",
                Style::default().fg(Color::DarkGray),
            )));
            for (i, starter) in CONVERSATION_STARTERS.iter().enumerate() {
                lines.push(Line::from(format!("  [{}] {starter}", i + 1)));
            }
        }

        lines
    }

    fn render_messages(&self, frame: &mut Frame, area: Rect) {
        let lines = self.message_lines();
        let inner_width = usize::from(area.width.saturating_sub(2)).max(1);
        let inner_height = area.height.saturating_sub(2);

        // Approximate wrapped height so the newest turn stays in view
        let total: usize = lines
            .iter()
            .map(|line| line.width().div_ceil(inner_width).max(1))
            .sum();
        let total = u16::try_from(total).unwrap_or(u16::MAX);
        let bottom = total.saturating_sub(inner_height);
        let offset = bottom.saturating_sub(self.scroll_back);

        let messages = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(TITLE)
                    .border_style(Style::default().fg(Color::Magenta)),
            )
            .wrap(Wrap { trim: false })
            .scroll((offset, 0));

        frame.render_widget(messages, area);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let line = match &self.status {
            Some(Status::Notice(notice)) => Line::from(vec![
                Span::styled(
                    format!("{} ", notice.title),
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(notice.description.clone(), Style::default().fg(Color::Red)),
                Span::styled("  (Esc to dismiss)", Style::default().fg(Color::DarkGray)),
            ]),
            Some(Status::Hint(hint)) => {
                Line::from(Span::styled(*hint, Style::default().fg(Color::Yellow)))
            }
            None => Line::default(),
        };
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_input(&self, frame: &mut Frame, area: Rect) {
        let awaiting = self.session.is_awaiting();
        let title = if awaiting { " Waiting for reply... " } else { " Message " };

        let content = if self.input.is_empty() {
            Span::styled(INPUT_PLACEHOLDER, Style::default().fg(Color::DarkGray))
        } else {
            Span::raw(self.input.clone())
        };

        let input = Paragraph::new(Line::from(content)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(if awaiting {
                    Style::default().fg(Color::DarkGray)
                } else {
                    Style::default().fg(Color::Cyan)
                }),
        );
        frame.render_widget(input, area);

        // Display cells, not chars: emoji take two columns
        let typed = u16::try_from(Span::raw(self.input.as_str()).width()).unwrap_or(u16::MAX);
        let x = area
            .x
            .saturating_add(1)
            .saturating_add(typed)
            .min(area.right().saturating_sub(2));
        frame.set_cursor_position((x, area.y + 1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persona::WELCOME_MESSAGE;
    use ratatui::{backend::TestBackend, Terminal};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            assert_eq!(app.handle_key(press(KeyCode::Char(c))), Action::None);
        }
    }

    fn rendered(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    fn cursor_column(app: &App) -> u16 {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        terminal.get_cursor_position().unwrap().x
    }

    #[test]
    fn cursor_follows_display_width_of_input() {
        let mut narrow = App::new();
        type_text(&mut narrow, "ab");
        let mut wide = App::new();
        type_text(&mut wide, "🎭");
        let mut single = App::new();
        type_text(&mut single, "a");

        assert_eq!(cursor_column(&wide), cursor_column(&narrow));
        assert_eq!(cursor_column(&single) + 1, cursor_column(&wide));
    }

    #[test]
    fn enter_sends_typed_text() {
        let mut app = App::new();
        type_text(&mut app, "hello");

        let action = app.handle_key(press(KeyCode::Enter));

        assert_eq!(
            action,
            Action::Send(vec![
                ChatMessage::assistant(WELCOME_MESSAGE),
                ChatMessage::user("hello")
            ])
        );
        assert!(app.input().is_empty());
        assert!(app.session().is_awaiting());
    }

    #[test]
    fn enter_on_blank_input_does_nothing() {
        let mut app = App::new();
        type_text(&mut app, "   ");
        assert_eq!(app.handle_key(press(KeyCode::Enter)), Action::None);
        assert_eq!(app.session().transcript().len(), 1);
        assert_eq!(app.input(), "   ");
    }

    #[test]
    fn enter_while_awaiting_keeps_draft_and_hints() {
        let mut app = App::new();
        type_text(&mut app, "first");
        app.handle_key(press(KeyCode::Enter));
        type_text(&mut app, "second");

        assert_eq!(app.handle_key(press(KeyCode::Enter)), Action::None);
        assert_eq!(app.input(), "second");
        assert_eq!(app.status(), Some(&Status::Hint(BUSY_HINT)));
        assert_eq!(app.session().transcript().len(), 2);
    }

    #[test]
    fn digit_picks_starter_only_on_fresh_conversation() {
        let mut app = App::new();
        let action = app.handle_key(press(KeyCode::Char('1')));
        match action {
            Action::Send(messages) => {
                assert_eq!(messages.last().unwrap().content, CONVERSATION_STARTERS[0]);
            }
            other => panic!("expected send, got {other:?}"),
        }

        app.on_relay_result(Ok("Why did...".into()));
        assert!(!app.session().show_starters());
        assert_eq!(app.handle_key(press(KeyCode::Char('2'))), Action::None);
        assert_eq!(app.input(), "2");
    }

    #[test]
    fn out_of_range_starter_is_ignored() {
        let mut app = App::new();
        assert_eq!(app.handle_key(press(KeyCode::Char('9'))), Action::None);
        assert_eq!(app.session().transcript().len(), 1);
    }

    #[test]
    fn failure_shows_notice_and_reenables_input() {
        let mut app = App::new();
        type_text(&mut app, "hi");
        app.handle_key(press(KeyCode::Enter));

        app.on_relay_result(Err(RelayError::network("refused")));

        assert!(matches!(app.status(), Some(Status::Notice(_))));
        assert!(!app.session().is_awaiting());
        assert_eq!(app.session().transcript().len(), 2);

        assert_eq!(app.handle_key(press(KeyCode::Esc)), Action::None);
        assert_eq!(app.status(), None);
        assert_eq!(app.handle_key(press(KeyCode::Esc)), Action::Quit);
    }

    #[test]
    fn ctrl_c_quits() {
        let mut app = App::new();
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(app.handle_key(key), Action::Quit);
    }

    #[test]
    fn renders_starters_then_typing_indicator() {
        let mut app = App::new();
        let screen = rendered(&app);
        assert!(screen.contains("Your Fun AI Buddy"));
        assert!(screen.contains("Try one of these:"));

        type_text(&mut app, "hi");
        app.handle_key(press(KeyCode::Enter));
        let screen = rendered(&app);
        assert!(screen.contains("Buddy is typing..."));
        assert!(screen.contains("Waiting for reply..."));
        assert!(!screen.contains("Try one of these:"));
    }
}

//! Chat relay server
//!
//! Serves the relay endpoint the chat widget posts its transcript to.

use chat_relay::api::{create_router, AppState};
use chat_relay::config::{CredentialSource, RelayConfig};
use chat_relay::llm::{GatewayService, LoggingService};
use chat_relay::relay::Relay;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chat_relay=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    let config = RelayConfig::from_env();
    let credentials = CredentialSource::Env(config.credential_var.clone());

    if credentials.resolve().is_none() {
        // Checked again on every request; the relay answers 500 until it is set
        tracing::warn!(
            var = %config.credential_var,
            "Upstream credential not configured"
        );
    }

    let gateway = Arc::new(GatewayService::new(&config.upstream_url, &config.model));
    let relay = Relay::new(Arc::new(LoggingService::new(gateway)));
    tracing::info!(
        model = %relay.model_id(),
        upstream = %config.upstream_url,
        "Relay initialized"
    );

    let app = create_router(AppState::new(relay, credentials));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Chat relay listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

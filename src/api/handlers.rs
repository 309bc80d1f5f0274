//! HTTP request handlers

use super::types::{ChatRequest, ChatResponse, ErrorResponse};
use super::AppState;
use crate::llm::RelayError;
use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/chat", post(chat))
        // Path the hosted widget has always called
        .route("/functions/v1/chat", post(chat))
        .route("/version", get(get_version))
        .with_state(state)
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}

/// Any origin, and the headers browser clients of the hosted function send
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
            header::CONTENT_TYPE,
        ])
}

// ============================================================
// Chat Relay
// ============================================================

// Body is JSON whatever the declared content type
async fn chat(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ChatResponse>, AppError> {
    let req: ChatRequest = serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!(error = %e, "Rejected chat request body");
        AppError::InvalidBody(format!("Invalid request body: {e}"))
    })?;

    let credential = state.credentials.resolve();
    let message = state
        .relay
        .complete(
            credential.as_deref(),
            state.credentials.name(),
            &req.messages,
        )
        .await?;

    Ok(Json(ChatResponse { message }))
}

async fn get_version() -> &'static str {
    concat!("chat-relay ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

enum AppError {
    Relay(RelayError),
    InvalidBody(String),
}

impl From<RelayError> for AppError {
    fn from(error: RelayError) -> Self {
        AppError::Relay(error)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Relay(e) => {
                tracing::error!(kind = e.kind.as_str(), error = %e.message, "Error in chat relay");
                let status = StatusCode::from_u16(e.kind.status_code())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                (status, e.message)
            }
            AppError::InvalidBody(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}

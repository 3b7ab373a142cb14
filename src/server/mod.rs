//! HTTP surface - `POST /chat` and `GET /health` on axum.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use log::{debug, error, info};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::chat::{ChatOrchestrator, MESSAGE_REQUIRED};
use crate::error::{Result, ToolchatError};

/// Shared, read-only state handed to every request
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<ChatOrchestrator>,
}

impl AppState {
    pub fn new(orchestrator: Arc<ChatOrchestrator>) -> Self {
        Self { orchestrator }
    }
}

/// Body of `POST /chat`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: Option<String>,
    /// Logged and otherwise unused: every request starts a fresh conversation
    pub session_id: Option<String>,
}

/// Successful `POST /chat` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
}

/// Errors rendered as `{ "error": message }`
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Rejected(JsonRejection),
    Internal(String),
}

impl From<ToolchatError> for ApiError {
    fn from(err: ToolchatError) -> Self {
        match err {
            ToolchatError::Validation(message) => Self::BadRequest(message),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            Self::Rejected(rejection) => (rejection.status(), rejection.body_text()),
            Self::Internal(message) => {
                error!("Chat request failed: {}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/chat", post(chat))
        .route("/health", get(health))
        .with_state(state)
}

async fn chat(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ChatRequest>, JsonRejection>,
) -> std::result::Result<Json<ChatReply>, ApiError> {
    let Json(request) = payload.map_err(ApiError::Rejected)?;

    let message = match request.message {
        Some(message) if !message.is_empty() => message,
        _ => return Err(ApiError::BadRequest(MESSAGE_REQUIRED.to_string())),
    };

    if let Some(session_id) = &request.session_id {
        debug!("Ignoring session id {}", session_id);
    }

    let outcome = state.orchestrator.respond(&message).await?;
    info!(
        "Chat reply ready (tool: {}, tokens: {})",
        outcome.tool.as_ref().map(|t| t.name.as_str()).unwrap_or("none"),
        outcome.usage.total()
    );

    Ok(Json(ChatReply { reply: outcome.reply }))
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Bind and serve until Ctrl-C
pub async fn serve(bind: &str, state: AppState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
}

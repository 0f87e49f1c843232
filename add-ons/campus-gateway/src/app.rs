//! HTTP surface: status, a JSON command API, and the Telegram webhook.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use campus_core::{Command, CoreConfig, DispatchError, Dispatcher, LedgerIndex, QueryError, RecordStore, RequestContext};
use serde::{Deserialize, Serialize};

use crate::handlers::chat;
use crate::telegram::{SendMessage, Update};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<CoreConfig>,
    pub dispatcher: Arc<Dispatcher>,
    pub store: Arc<RecordStore>,
    pub ledger: Arc<LedgerIndex>,
    /// Username reported by `getMe`, when known.
    pub bot_username: Option<String>,
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/v1/status", get(status))
        .route("/v1/command", post(command))
        .route("/telegram/webhook", post(telegram_webhook))
        .with_state(state)
}

async fn status(State(state): State<AppState>) -> Json<serde_json::Value> {
    let commands: Vec<&str> = state
        .dispatcher
        .registry()
        .commands()
        .iter()
        .map(|c| c.as_str())
        .collect();
    Json(serde_json::json!({
        "app_name": state.config.app_name,
        "transport": state.config.transport.as_str(),
        "students": state.store.len(),
        "certificates": state.ledger.len(),
        "commands": commands,
    }))
}

#[derive(Debug, Deserialize)]
struct CommandRequest {
    command: String,
    #[serde(default)]
    argument: Option<String>,
}

fn error_body(status: StatusCode, kind: &str, message: String) -> Response {
    (status, Json(serde_json::json!({ "status": kind, "message": message }))).into_response()
}

async fn command(State(state): State<AppState>, Json(body): Json<CommandRequest>) -> Response {
    let command = match body.command.trim_start_matches('/').parse::<Command>() {
        Ok(c) => c,
        Err(e) => return error_body(StatusCode::BAD_REQUEST, "unknown_command", e.to_string()),
    };
    let ctx = RequestContext::detached();
    match state.dispatcher.dispatch(&ctx, command, body.argument.as_deref()) {
        Ok(reply) => Json(serde_json::json!({
            "status": "ok",
            "command": reply.command(),
            "correlation_id": ctx.correlation_id,
            "reply": reply,
        }))
        .into_response(),
        Err(DispatchError::Query(e @ QueryError::Usage { .. })) => {
            error_body(StatusCode::BAD_REQUEST, "usage_error", e.to_string())
        }
        Err(DispatchError::Query(e @ QueryError::NotFound { .. })) => {
            error_body(StatusCode::NOT_FOUND, "not_found", e.to_string())
        }
        Err(e @ DispatchError::Unregistered(_)) => {
            error_body(StatusCode::INTERNAL_SERVER_ERROR, "unregistered", e.to_string())
        }
    }
}

/// Inline webhook answer: Telegram executes the method named in the response body.
#[derive(Debug, Serialize)]
struct WebhookReply {
    method: &'static str,
    #[serde(flatten)]
    message: SendMessage,
}

async fn telegram_webhook(State(state): State<AppState>, Json(update): Json<Update>) -> Json<serde_json::Value> {
    let Some((chat_id, text)) = update.text_message() else {
        return Json(serde_json::json!({}));
    };
    let ctx = RequestContext::for_chat(chat_id);
    match chat::answer_text(&state.dispatcher, state.bot_username.as_deref(), &ctx, text) {
        Some(reply) => {
            let body = WebhookReply {
                method: "sendMessage",
                message: SendMessage::new(chat_id, &reply),
            };
            Json(serde_json::to_value(body).unwrap_or_else(|_| serde_json::json!({})))
        }
        None => Json(serde_json::json!({})),
    }
}

//! Minimal Telegram Bot API client: the update types the bot reads, `getMe`,
//! `getUpdates` long polling and `sendMessage`.

use std::sync::Arc;
use std::time::Duration;

use campus_core::Dispatcher;
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};

use crate::error::GatewayError;
use crate::handlers::chat;
use crate::render::Reply;

/// Incoming update. New and edited messages are acted on.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
    #[serde(default)]
    pub edited_message: Option<Message>,
}

impl Update {
    /// The new or edited message carried by the update.
    pub fn any_message(&self) -> Option<&Message> {
        self.message.as_ref().or(self.edited_message.as_ref())
    }

    /// `(chat_id, text)` when the update is a text message.
    pub fn text_message(&self) -> Option<(i64, &str)> {
        let message = self.any_message()?;
        let text = message.text.as_deref()?;
        Some((message.chat.id, text))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub chat: Chat,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BotUser {
    pub id: i64,
    #[serde(default)]
    pub username: Option<String>,
}

/// Envelope of every Bot API response.
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    #[serde(default)]
    description: Option<String>,
}

/// `sendMessage` parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SendMessage {
    pub chat_id: i64,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<&'static str>,
}

impl SendMessage {
    pub fn new(chat_id: i64, reply: &Reply) -> Self {
        Self {
            chat_id,
            text: reply.text.clone(),
            parse_mode: reply.markdown.then_some("MarkdownV2"),
        }
    }
}

/// Update kinds requested from `getUpdates`.
const ALLOWED_UPDATES: [&str; 2] = ["message", "edited_message"];

#[derive(Debug, Serialize)]
struct GetUpdates {
    #[serde(skip_serializing_if = "Option::is_none")]
    offset: Option<i64>,
    timeout: u64,
    allowed_updates: [&'static str; 2],
}

/// Where chat replies go. The polling loop sends through [`TelegramClient`].
#[async_trait::async_trait]
pub trait ReplySink: Send + Sync {
    async fn send_reply(&self, chat_id: i64, reply: &Reply) -> Result<(), GatewayError>;
}

pub struct TelegramClient {
    http: reqwest::Client,
    /// `{api_url}/bot{token}`. Never logged.
    base_url: String,
}

impl TelegramClient {
    /// Client whose request timeout outlasts a `poll_timeout_secs` long poll.
    pub fn new(api_url: &str, token: &str, poll_timeout_secs: u64) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(poll_timeout_secs + 10))
            .build()?;
        Ok(Self {
            http,
            base_url: format!("{}/bot{}", api_url.trim_end_matches('/'), token),
        })
    }

    async fn call<P, R>(&self, method: &'static str, params: &P) -> Result<R, GatewayError>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url, method);
        // Error statuses still carry the JSON envelope; `ok` decides.
        let response: ApiResponse<R> = self.http.post(url).json(params).send().await?.json().await?;
        if !response.ok {
            return Err(GatewayError::TelegramApi {
                method,
                description: response.description.unwrap_or_else(|| "no description".to_string()),
            });
        }
        response.result.ok_or_else(|| GatewayError::TelegramApi {
            method,
            description: "response had no result".to_string(),
        })
    }

    pub async fn get_me(&self) -> Result<BotUser, GatewayError> {
        self.call("getMe", &serde_json::json!({})).await
    }

    pub async fn get_updates(&self, offset: Option<i64>, timeout_secs: u64) -> Result<Vec<Update>, GatewayError> {
        let params = GetUpdates {
            offset,
            timeout: timeout_secs,
            allowed_updates: ALLOWED_UPDATES,
        };
        self.call("getUpdates", &params).await
    }

    pub async fn send_message(&self, message: &SendMessage) -> Result<(), GatewayError> {
        let _: IgnoredAny = self.call("sendMessage", message).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl ReplySink for TelegramClient {
    async fn send_reply(&self, chat_id: i64, reply: &Reply) -> Result<(), GatewayError> {
        self.send_message(&SendMessage::new(chat_id, reply)).await
    }
}

/// Next `getUpdates` offset after a batch: one past the highest update id seen.
pub fn next_offset(current: Option<i64>, updates: &[Update]) -> Option<i64> {
    updates
        .iter()
        .map(|u| u.update_id + 1)
        .chain(current)
        .max()
}

/// Long-polls for updates and answers each text command. Runs until the task is aborted.
pub async fn run_polling(
    client: Arc<TelegramClient>,
    dispatcher: Arc<Dispatcher>,
    bot_username: Option<String>,
    timeout_secs: u64,
    retry: Duration,
) {
    tracing::info!(target: "campus::telegram", timeout_secs, "Polling loop started");
    let mut offset: Option<i64> = None;
    loop {
        match client.get_updates(offset, timeout_secs).await {
            Ok(updates) => {
                offset = next_offset(offset, &updates);
                for update in &updates {
                    chat::process_update(&dispatcher, bot_username.as_deref(), client.as_ref(), update).await;
                }
            }
            Err(e) => {
                tracing::warn!(
                    target: "campus::telegram",
                    error = %e,
                    retry_secs = retry.as_secs(),
                    "getUpdates failed"
                );
                tokio::time::sleep(retry).await;
            }
        }
    }
}

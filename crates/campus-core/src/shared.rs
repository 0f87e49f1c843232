//! Shared types used across the campus bot crates.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default config file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config/gateway.toml";

/// Environment variable holding the Telegram bot credential.
pub const TOKEN_ENV: &str = "TELEGRAM_TOKEN";

/// Per-request context handed from the transport to every command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// Chat the command arrived from, when it came through a chat transport.
    #[serde(default)]
    pub chat_id: Option<i64>,
    /// Correlation id for request tracing.
    pub correlation_id: String,
}

impl RequestContext {
    /// Context for a command received in `chat_id`, with a fresh correlation id.
    pub fn for_chat(chat_id: i64) -> Self {
        Self {
            chat_id: Some(chat_id),
            correlation_id: uuid::Uuid::new_v4().simple().to_string(),
        }
    }

    /// Context for a command that did not come from a chat (HTTP API, tests).
    pub fn detached() -> Self {
        Self {
            chat_id: None,
            correlation_id: uuid::Uuid::new_v4().simple().to_string(),
        }
    }
}

/// How the gateway receives Telegram updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    /// Long-poll `getUpdates`.
    #[default]
    Polling,
    /// Telegram pushes updates to `POST /telegram/webhook`.
    Webhook,
}

impl TransportMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Polling => "polling",
            TransportMode::Webhook => "webhook",
        }
    }
}

/// Global application configuration. Load from TOML or env.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Bot identity shown in the greeting.
    pub app_name: String,
    /// Bind address for the HTTP API.
    pub host: String,
    /// HTTP port for the gateway.
    pub port: u16,
    #[serde(default)]
    pub transport: TransportMode,
    /// Alternative student dataset (JSON). When unset the embedded dataset is used.
    #[serde(default)]
    pub dataset_path: Option<String>,
    /// Base URL of the Telegram Bot API.
    pub telegram_api_url: String,
    /// Long-poll timeout passed to `getUpdates`.
    pub poll_timeout_secs: u64,
    /// Delay before retrying after a failed poll.
    pub poll_retry_secs: u64,
}

impl CoreConfig {
    /// Load config from file and environment. Precedence: env `CAMPUS_CONFIG` path > `config/gateway.toml` > defaults.
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path =
            std::env::var("CAMPUS_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(Path::new(&config_path))
    }

    /// Load config from `path` (skipped when missing), then `CAMPUS_*` environment overrides.
    pub fn load_from(path: &Path) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .set_default("app_name", "College Student Info Bot")?
            .set_default("host", "127.0.0.1")?
            .set_default("port", 8001_i64)?
            .set_default("transport", "polling")?
            .set_default("telegram_api_url", "https://api.telegram.org")?
            .set_default("poll_timeout_secs", 30_i64)?
            .set_default("poll_retry_secs", 5_i64)?;

        let builder = if path.exists() {
            builder.add_source(config::File::from(path))
        } else {
            builder
        };

        let built = builder
            .add_source(
                config::Environment::with_prefix("CAMPUS")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        built.try_deserialize()
    }
}

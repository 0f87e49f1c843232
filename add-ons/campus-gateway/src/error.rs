use campus_core::ConfigurationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("config load failed: {0}")]
    Config(#[from] config::ConfigError),

    #[error("dataset rejected: {0}")]
    Dataset(#[from] ConfigurationError),

    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    #[error("Telegram API {method} failed: {description}")]
    TelegramApi {
        method: &'static str,
        description: String,
    },

    #[error("invalid bind address: {0}")]
    BindAddress(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for GatewayError {
    /// Request URLs embed the bot token; never keep them in the error.
    fn from(e: reqwest::Error) -> Self {
        GatewayError::Http(e.without_url())
    }
}

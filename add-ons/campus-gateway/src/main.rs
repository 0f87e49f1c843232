//! Campus info bot gateway: Telegram transport plus a small HTTP API. Config-driven via CoreConfig.

mod app;
mod error;
mod handlers;
mod render;
mod telegram;

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use campus_core::{CoreConfig, Dispatcher, LedgerIndex, RecordStore, TransportMode, TOKEN_ENV};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::{build_app, AppState};
use crate::error::GatewayError;
use crate::telegram::TelegramClient;

fn bind_addr(config: &CoreConfig) -> Result<SocketAddr, GatewayError> {
    let ip: IpAddr = config
        .host
        .parse()
        .map_err(|_| GatewayError::BindAddress(config.host.clone()))?;
    Ok(SocketAddr::new(ip, config.port))
}

/// Bot token from the raw env value. Unset and blank are both missing.
fn require_token(raw: Option<String>) -> Result<String, String> {
    match raw {
        Some(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
        _ => Err(format!("{} not found in environment.", TOKEN_ENV)),
    }
}

/// Pre-flight check: config loads, dataset validates, token present, port free.
fn run_verify() -> Result<(), String> {
    print!("Checking config... ");
    let config = CoreConfig::load().map_err(|e| format!("Config load failed: {}", e))?;
    println!("OK ({} transport)", config.transport.as_str());

    print!("Checking dataset... ");
    let store = RecordStore::for_config(&config).map_err(|e| format!("Dataset rejected: {}", e))?;
    let ledger = LedgerIndex::build(&store);
    println!("OK ({} students, {} certificates)", store.len(), ledger.len());

    print!("Checking {}... ", TOKEN_ENV);
    require_token(std::env::var(TOKEN_ENV).ok())?;
    println!("OK");

    let addr = bind_addr(&config).map_err(|e| e.to_string())?;
    print!("Checking port {}... ", addr.port());
    match std::net::TcpListener::bind(addr) {
        Ok(listener) => {
            drop(listener);
            println!("OK (available)");
        }
        Err(e) => return Err(format!("Port {} BLOCKED: {}", addr.port(), e)),
    }

    println!("\n✅ SUCCESS: All systems GO. Ready to start gateway.");
    Ok(())
}

#[tokio::main]
async fn main() {
    // Load .env file if present (before any env::var calls)
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("[campus-gateway] .env not loaded: {} (using system environment)", e);
    }

    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "--verify") {
        match run_verify() {
            Ok(()) => std::process::exit(0),
            Err(e) => {
                eprintln!("❌ PRE-FLIGHT FAILED: {}", e);
                std::process::exit(1);
            }
        }
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let token = match require_token(std::env::var(TOKEN_ENV).ok()) {
        Ok(token) => token,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(token).await {
        tracing::error!(error = %e, "Gateway stopped");
        eprintln!("❌ campus-gateway failed: {}", e);
        std::process::exit(1);
    }
}

async fn run(token: String) -> Result<(), GatewayError> {
    let config = Arc::new(CoreConfig::load()?);

    // Both stores are complete before anything can reach the dispatcher.
    let store = Arc::new(RecordStore::for_config(&config)?);
    let ledger = Arc::new(LedgerIndex::build(&store));
    let registry = campus_skills::default_registry(&config.app_name, Arc::clone(&store), Arc::clone(&ledger));
    let dispatcher = Arc::new(Dispatcher::new(Arc::new(registry)));

    let client = Arc::new(TelegramClient::new(
        &config.telegram_api_url,
        &token,
        config.poll_timeout_secs,
    )?);
    // Group commands are matched against this username.
    let bot_username = match client.get_me().await {
        Ok(me) => {
            tracing::info!(
                target: "campus::telegram",
                bot_id = me.id,
                username = me.username.as_deref().unwrap_or("-"),
                "Bot identity confirmed"
            );
            me.username
        }
        Err(e) => {
            tracing::warn!(
                target: "campus::telegram",
                error = %e,
                "getMe failed; accepting any @bot suffix"
            );
            None
        }
    };

    let polling = match config.transport {
        TransportMode::Polling => {
            Some(tokio::spawn(telegram::run_polling(
                client,
                Arc::clone(&dispatcher),
                bot_username.clone(),
                config.poll_timeout_secs,
                Duration::from_secs(config.poll_retry_secs.max(1)),
            )))
        }
        TransportMode::Webhook => {
            tracing::info!(
                target: "campus::telegram",
                "Webhook mode: point the bot webhook at /telegram/webhook"
            );
            None
        }
    };

    let app = build_app(AppState {
        config: Arc::clone(&config),
        dispatcher,
        store,
        ledger,
        bot_username,
    });

    let addr = bind_addr(&config)?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("{} listening on {} ({} transport)", config.app_name, addr, config.transport.as_str());
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(handle) = polling {
        handle.abort();
    }
    tracing::info!("Gateway shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Ctrl-C handler unavailable");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_blank_token_is_reported() {
        let expected = format!("{} not found in environment.", TOKEN_ENV);
        assert_eq!(require_token(None), Err(expected.clone()));
        assert_eq!(require_token(Some(String::new())), Err(expected.clone()));
        assert_eq!(require_token(Some(" \t\n".to_string())), Err(expected));
    }

    #[test]
    fn present_token_is_returned_trimmed() {
        assert_eq!(
            require_token(Some("123456:ABC-def\n".to_string())),
            Ok("123456:ABC-def".to_string())
        );
    }

    #[test]
    fn bind_addr_rejects_hostnames() {
        let mut config = CoreConfig::load_from(std::path::Path::new("does/not/exist.toml")).unwrap();
        config.port = 9000;
        assert_eq!(bind_addr(&config).unwrap(), "127.0.0.1:9000".parse::<SocketAddr>().unwrap());

        config.host = "localhost".to_string();
        assert!(matches!(bind_addr(&config), Err(GatewayError::BindAddress(h)) if h == "localhost"));
    }
}

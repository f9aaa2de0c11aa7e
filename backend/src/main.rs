//! Backend entry-point: reads the environment, builds the server
//! configuration, and runs the HTTP server.

use std::env;
use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use actix_web::web;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};
use url::Url;

use backend::inbound::http::health::HealthState;
use backend::outbound::persistence::{DbPool, PoolConfig};

use crate::server::{GeminiSettings, ServerConfig, create_server};

mod server;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_SHARE_BASE: &str = "http://localhost:8080/";

fn load_session_key() -> std::io::Result<Key> {
    let key_path =
        env::var("SESSION_KEY_FILE").unwrap_or_else(|_| "/var/run/secrets/session_key".into());
    match std::fs::read(&key_path) {
        Ok(bytes) => Ok(Key::derive_from(&bytes)),
        Err(e) => {
            let allow_dev = env::var("SESSION_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
            if cfg!(debug_assertions) || allow_dev {
                warn!(path = %key_path, error = %e, "using temporary session key (dev only)");
                Ok(Key::generate())
            } else {
                Err(std::io::Error::other(format!(
                    "failed to read session key at {key_path}: {e}"
                )))
            }
        }
    }
}

fn env_url(name: &str) -> std::io::Result<Option<Url>> {
    match env::var(name) {
        Ok(raw) => Url::parse(&raw)
            .map(Some)
            .map_err(|e| std::io::Error::other(format!("invalid {name}: {e}"))),
        Err(_) => Ok(None),
    }
}

async fn build_config() -> std::io::Result<ServerConfig> {
    let key = load_session_key()?;

    let cookie_secure = env::var("SESSION_COOKIE_SECURE")
        .map(|v| v != "0")
        .unwrap_or(true);

    let bind_addr: SocketAddr = env::var("BIND_ADDR")
        .unwrap_or_else(|_| DEFAULT_BIND_ADDR.into())
        .parse()
        .map_err(|e| std::io::Error::other(format!("invalid BIND_ADDR: {e}")))?;

    let share_base = match env_url("SHARE_BASE_URL")? {
        Some(url) => url,
        None => Url::parse(DEFAULT_SHARE_BASE)
            .map_err(|e| std::io::Error::other(format!("invalid default share base: {e}")))?,
    };

    let mut config = ServerConfig::new(key, cookie_secure, SameSite::Lax, bind_addr, share_base);

    if let Ok(database_url) = env::var("DATABASE_URL") {
        let pool = DbPool::new(PoolConfig::new(database_url))
            .await
            .map_err(|e| std::io::Error::other(format!("database pool init failed: {e}")))?;
        config = config.with_db_pool(pool);
    }

    if let Some(endpoint) = env_url("GEMINI_API_URL")? {
        let api_key = env::var("GEMINI_API_KEY")
            .map_err(|_| std::io::Error::other("GEMINI_API_URL set without GEMINI_API_KEY"))?;
        config = config.with_gemini(GeminiSettings { endpoint, api_key });
    }

    if let Some(endpoint) = env_url("AUTH_USER_INFO_URL")? {
        config = config.with_user_info_endpoint(endpoint);
    }

    if let Ok(prompt) = env::var("GENERATION_SYSTEM_PROMPT") {
        config = config.with_system_prompt(prompt);
    }

    Ok(config)
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = build_config().await?;
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    server.await
}

//! Server configuration from the environment
//!
//! `.env` is loaded first (see `main`), then every setting falls back to a
//! development default except the session secret in release builds.

use anyhow::{Context, bail};
use base64::Engine;
use base64::engine::general_purpose;
use csrf::{CsrfConfig, TokenSource};
use std::env;
use std::net::SocketAddr;
use std::time::Duration;

/// Everything `main` needs to start serving
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub listen_addr: SocketAddr,
    pub frontend_origins: Vec<String>,
    pub cleanup_interval: Duration,
    pub csrf: CsrfConfig,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let listen_addr: SocketAddr = env::var("LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:5555".to_string())
            .parse()
            .context("LISTEN_ADDR must be host:port")?;

        let frontend_origins = env::var("FRONTEND_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let cleanup_interval = Duration::from_secs(
            env::var("SESSION_CLEANUP_INTERVAL_SECS")
                .ok()
                .map(|v| v.parse::<u64>())
                .transpose()
                .context("SESSION_CLEANUP_INTERVAL_SECS must be an integer")?
                .unwrap_or(300),
        );

        Ok(Self {
            listen_addr,
            frontend_origins,
            cleanup_interval,
            csrf: csrf_config_from_env()?,
        })
    }
}

fn csrf_config_from_env() -> anyhow::Result<CsrfConfig> {
    let mut config = if cfg!(debug_assertions) {
        CsrfConfig::development()
    } else {
        CsrfConfig::default()
    };

    match env::var("CSRF_SESSION_SECRET") {
        Ok(secret_b64) => config.session_secret = decode_secret(&secret_b64)?,
        Err(_) if cfg!(debug_assertions) => {
            tracing::warn!("CSRF_SESSION_SECRET not set, using a random secret");
        }
        Err(_) => bail!("CSRF_SESSION_SECRET must be set in production"),
    }

    if let Ok(bits) = env::var("CSRF_TOKEN_SIZE_BITS") {
        let bits: u16 = bits
            .parse()
            .context("CSRF_TOKEN_SIZE_BITS must be an integer")?;
        config = config.with_token_size_bits(bits)?;
    }

    if let Ok(source) = env::var("CSRF_TOKEN_SOURCE") {
        config.token_source = source.parse::<TokenSource>()?;
    }

    if let Ok(single_use) = env::var("CSRF_SINGLE_USE") {
        config.single_use = parse_bool("CSRF_SINGLE_USE", &single_use)?;
    }

    if let Ok(secure) = env::var("CSRF_COOKIE_SECURE") {
        config.cookie_secure = parse_bool("CSRF_COOKIE_SECURE", &secure)?;
    }

    Ok(config)
}

/// Standard base64, exactly 32 bytes
fn decode_secret(secret_b64: &str) -> anyhow::Result<[u8; 32]> {
    let bytes = general_purpose::STANDARD
        .decode(secret_b64.trim())
        .context("CSRF_SESSION_SECRET must be base64")?;
    bytes
        .try_into()
        .map_err(|b: Vec<u8>| anyhow::anyhow!("CSRF_SESSION_SECRET must be 32 bytes, got {}", b.len()))
}

fn parse_bool(name: &str, value: &str) -> anyhow::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("{} must be a boolean, got {:?}", name, other),
    }
}

//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request-level errors go through
//! `kernel::error::AppError`.

mod config;
mod routes;

use csrf::{CsrfAppState, MemorySessionTokenStore, SessionTokenStore};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,csrf=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    tracing::info!(
        token_bits = config.csrf.token_size.bits(),
        token_source = %config.csrf.token_source,
        single_use = config.csrf.single_use,
        "CSRF protection configured"
    );

    let store = MemorySessionTokenStore::new(config.csrf.session_ttl);

    // Expired sessions are purged periodically; failures are logged and retried next tick
    let cleanup_store = store.clone();
    let cleanup_interval = config.cleanup_interval.max(Duration::from_secs(1));
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(cleanup_interval);
        loop {
            ticker.tick().await;
            match cleanup_store.cleanup_expired().await {
                Ok(sessions) => {
                    tracing::debug!(sessions_deleted = sessions, "Session cleanup completed");
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Session cleanup failed, continuing anyway");
                }
            }
        }
    });

    let state = CsrfAppState::new(store, config.csrf.clone());
    let app = routes::build_app(&config, state);

    // Start server
    let addr = config.listen_addr;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

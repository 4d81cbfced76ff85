//! Demo routes and router composition

use axum::http::{HeaderName, HeaderValue, Method, header};
use axum::routing::{get, post};
use axum::{Json, Router};
use csrf::{CsrfAppState, MemorySessionTokenStore, TokenSource, csrf_router, protect, with_sessions};
use serde::Serialize;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

/// Response for POST /secret-stuff
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretResponse {
    pub unpopular_opinion: &'static str,
}

/// GET /hello
pub async fn hello() -> &'static str {
    "Hello World!"
}

/// POST /secret-stuff (behind the CSRF gate)
pub async fn secret_stuff() -> Json<SecretResponse> {
    tracing::info!("Protected handler reached");
    Json(SecretResponse {
        unpopular_opinion: "Game of Thrones was amazing",
    })
}

/// Build the full application router
pub fn build_app(config: &ServerConfig, state: CsrfAppState<MemorySessionTokenStore>) -> Router {
    let protected = Router::new().route("/secret-stuff", post(secret_stuff));

    let app = Router::new()
        .route("/hello", get(hello))
        .merge(csrf_router(state.clone()))
        .merge(protect(protected, state.clone()));

    with_sessions(app, state.config.clone())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(config))
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = config
        .frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let mut allowed_headers = vec![header::CONTENT_TYPE, header::ACCEPT];
    if let TokenSource::Header(name) = &config.csrf.token_source {
        match HeaderName::from_bytes(name.as_bytes()) {
            Ok(name) => allowed_headers.push(name),
            Err(e) => tracing::warn!(error = %e, header = %name, "Token header not allowed by CORS"),
        }
    }

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ]))
        .allow_headers(AllowHeaders::list(allowed_headers))
        .allow_credentials(true)
}

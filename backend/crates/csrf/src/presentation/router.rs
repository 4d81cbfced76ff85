//! CSRF Router

use axum::{Router, middleware::from_fn_with_state, routing::get};
use std::sync::Arc;

use crate::application::config::CsrfConfig;
use crate::domain::repository::SessionTokenStore;
use crate::infra::memory::MemorySessionTokenStore;
use crate::presentation::handlers::{self, CsrfAppState};
use crate::presentation::middleware::{attach_session, require_csrf_token};

/// Create the token issuance router backed by the in-memory store
pub fn csrf_router(state: CsrfAppState<MemorySessionTokenStore>) -> Router {
    csrf_router_generic(state)
}

/// Create a token issuance router for any store implementation
pub fn csrf_router_generic<S>(state: CsrfAppState<S>) -> Router
where
    S: SessionTokenStore + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/csrf-token", get(handlers::issue_token::<S>))
        .with_state(state)
}

/// Put the CSRF gate in front of every route already in `routes`
pub fn protect<S>(routes: Router, state: CsrfAppState<S>) -> Router
where
    S: SessionTokenStore + Clone + Send + Sync + 'static,
{
    routes.route_layer(from_fn_with_state(state, require_csrf_token::<S>))
}

/// Resolve a session for every request reaching `app`
pub fn with_sessions(app: Router, config: Arc<CsrfConfig>) -> Router {
    app.layer(from_fn_with_state(config, attach_session))
}

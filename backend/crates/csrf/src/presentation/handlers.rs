//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderValue, header};
use axum::response::IntoResponse;
use std::sync::Arc;

use crate::application::IssueTokenUseCase;
use crate::application::config::CsrfConfig;
use crate::domain::repository::SessionTokenStore;
use crate::error::{CsrfError, CsrfResult};
use crate::presentation::dto::TokenResponse;
use crate::presentation::middleware::SessionContext;

/// Shared state for CSRF handlers and the gate
#[derive(Clone)]
pub struct CsrfAppState<S>
where
    S: SessionTokenStore + Clone + Send + Sync + 'static,
{
    pub store: Arc<S>,
    pub config: Arc<CsrfConfig>,
}

impl<S> CsrfAppState<S>
where
    S: SessionTokenStore + Clone + Send + Sync + 'static,
{
    pub fn new(store: S, config: CsrfConfig) -> Self {
        Self {
            store: Arc::new(store),
            config: Arc::new(config),
        }
    }
}

/// GET /csrf-token
///
/// Emits the same token twice: in the JSON body and as a cookie.
pub async fn issue_token<S>(
    State(state): State<CsrfAppState<S>>,
    session: SessionContext,
) -> CsrfResult<impl IntoResponse>
where
    S: SessionTokenStore + Clone + Send + Sync + 'static,
{
    let use_case = IssueTokenUseCase::new(state.store.clone(), state.config.clone());

    let output = use_case.execute(session.session_id).await?;

    let cookie = state
        .config
        .token_cookie()
        .header_value(output.token.as_str())
        .map_err(|e| CsrfError::Internal(format!("token cookie: {}", e)))?;

    Ok((
        [
            (header::SET_COOKIE, cookie),
            (header::CACHE_CONTROL, HeaderValue::from_static("no-store")),
        ],
        Json(TokenResponse::new(&state.config.response_field, &output.token)),
    ))
}

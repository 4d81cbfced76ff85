//! CSRF Middleware
//!
//! - [`attach_session`] resolves the session behind every request
//! - [`require_csrf_token`] gates protected routes

use axum::body::Body;
use axum::extract::{FromRequestParts, Request, State};
use axum::http::header;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use http_body_util::LengthLimitError;
use kernel::id::SessionId;
use platform::cookie::extract_cookie;
use std::sync::Arc;

use crate::application::ProtectRequestUseCase;
use crate::application::config::{CsrfConfig, TokenSource};
use crate::application::session_token::{create_session_token, verify_session_token};
use crate::domain::repository::SessionTokenStore;
use crate::error::{CsrfError, CsrfResult};
use crate::presentation::handlers::CsrfAppState;

/// Session resolved for the current request, stored in request extensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionContext {
    pub session_id: SessionId,
    /// Minted by this request; a session cookie goes out with the response
    pub is_new: bool,
}

impl<S> FromRequestParts<S> for SessionContext
where
    S: Send + Sync,
{
    type Rejection = CsrfError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionContext>()
            .copied()
            .ok_or(CsrfError::SessionMissing)
    }
}

/// Middleware that attaches a session to every request
///
/// Requests without a correctly signed session cookie get a new session,
/// and the response carries its cookie.
pub async fn attach_session(
    State(config): State<Arc<CsrfConfig>>,
    mut req: Request,
    next: Next,
) -> Response {
    let existing = extract_cookie(req.headers(), &config.session_cookie_name)
        .and_then(|token| verify_session_token(&token, &config.session_secret));

    let context = match existing {
        Some(session_id) => SessionContext {
            session_id,
            is_new: false,
        },
        None => {
            let session_id = SessionId::new();
            tracing::debug!(session_id = %session_id, "Starting new session");
            SessionContext {
                session_id,
                is_new: true,
            }
        }
    };

    req.extensions_mut().insert(context);

    let mut response = next.run(req).await;

    if context.is_new {
        let value = create_session_token(&context.session_id, &config.session_secret);
        match config.session_cookie().header_value(&value) {
            Ok(cookie) => {
                response.headers_mut().append(header::SET_COOKIE, cookie);
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to build session cookie");
            }
        }
    }

    response
}

/// Middleware that requires a valid CSRF token
///
/// The protected handler only runs when the gate resolves to `Ok`.
pub async fn require_csrf_token<S>(
    State(state): State<CsrfAppState<S>>,
    req: Request,
    next: Next,
) -> CsrfResult<Response>
where
    S: SessionTokenStore + Clone + Send + Sync + 'static,
{
    let session = req
        .extensions()
        .get::<SessionContext>()
        .copied()
        .ok_or(CsrfError::SessionMissing)?;

    let (req, supplied) = take_supplied_token(req, &state.config).await?;

    let use_case = ProtectRequestUseCase::new(state.store.clone(), state.config.clone());
    use_case
        .execute(session.session_id, supplied.as_deref())
        .await?;

    let mut response = next.run(req).await;

    // Spent token: the client's cookie copy is stale now
    if state.config.single_use {
        match state.config.token_cookie().delete_header_value() {
            Ok(cookie) => {
                response.headers_mut().append(header::SET_COOKIE, cookie);
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to build token cookie removal");
            }
        }
    }

    Ok(response)
}

/// Read the client's token from the configured channel
///
/// Body reads buffer the body and put it back so the handler still sees it.
async fn take_supplied_token(
    req: Request,
    config: &CsrfConfig,
) -> CsrfResult<(Request, Option<String>)> {
    match &config.token_source {
        TokenSource::Header(name) => {
            let token = req
                .headers()
                .get(name.as_str())
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            Ok((req, token))
        }
        TokenSource::Cookie(name) => {
            let token = extract_cookie(req.headers(), name);
            Ok((req, token))
        }
        TokenSource::JsonBody(field) => {
            let (parts, body) = req.into_parts();
            let bytes = axum::body::to_bytes(body, config.max_body_bytes)
                .await
                .map_err(|e| {
                    if exceeds_length_limit(&e) {
                        tracing::debug!(limit = config.max_body_bytes, "Request body over limit");
                        CsrfError::PayloadTooLarge
                    } else {
                        tracing::warn!(error = %e, "Failed to read request body");
                        CsrfError::BodyUnreadable
                    }
                })?;

            let token = serde_json::from_slice::<serde_json::Value>(&bytes)
                .ok()
                .and_then(|value| value.get(field)?.as_str().map(str::to_string));

            Ok((Request::from_parts(parts, Body::from(bytes)), token))
        }
    }
}

fn exceeds_length_limit(err: &axum::Error) -> bool {
    let mut source: Option<&(dyn std::error::Error + 'static)> = Some(err);
    while let Some(e) = source {
        if e.is::<LengthLimitError>() {
            return true;
        }
        source = e.source();
    }
    false
}

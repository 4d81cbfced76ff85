//! Protect Request Use Case
//!
//! The gate in front of state-changing handlers. Resolves every request to
//! either `Ok(())` (advance) or `Err(CsrfError::InvalidCsrfToken)` (reject).

use kernel::id::SessionId;
use std::sync::Arc;

use crate::application::config::CsrfConfig;
use crate::application::validate_token::ValidateTokenUseCase;
use crate::domain::repository::SessionTokenStore;
use crate::error::{CsrfError, CsrfResult};

pub struct ProtectRequestUseCase<S>
where
    S: SessionTokenStore,
{
    store: Arc<S>,
    config: Arc<CsrfConfig>,
}

impl<S> ProtectRequestUseCase<S>
where
    S: SessionTokenStore,
{
    pub fn new(store: Arc<S>, config: Arc<CsrfConfig>) -> Self {
        Self { store, config }
    }

    pub async fn execute(&self, session_id: SessionId, supplied: Option<&str>) -> CsrfResult<()> {
        let validator = ValidateTokenUseCase::new(self.store.clone());

        if !validator.is_valid(session_id, supplied).await? {
            tracing::warn!(
                session_id = %session_id,
                token_present = supplied.is_some_and(|t| !t.is_empty()),
                "CSRF token mismatch"
            );
            return Err(CsrfError::InvalidCsrfToken);
        }

        if self.config.single_use {
            // is_valid guarantees a supplied token here
            let supplied = supplied.unwrap_or_default();

            // A concurrent request of the same session may have spent it
            if !self.store.consume(session_id, supplied).await? {
                tracing::warn!(session_id = %session_id, "CSRF token already spent");
                return Err(CsrfError::InvalidCsrfToken);
            }
        }

        tracing::debug!(session_id = %session_id, "CSRF token accepted");

        Ok(())
    }
}

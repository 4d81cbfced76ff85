//! Validate Token Use Case

use kernel::id::SessionId;
use std::sync::Arc;

use crate::domain::repository::SessionTokenStore;
use crate::domain::services::tokens_match;
use crate::error::CsrfResult;

/// Read-only check of a supplied token against the session's pending token
pub struct ValidateTokenUseCase<S>
where
    S: SessionTokenStore,
{
    store: Arc<S>,
}

impl<S> ValidateTokenUseCase<S>
where
    S: SessionTokenStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn is_valid(&self, session_id: SessionId, supplied: Option<&str>) -> CsrfResult<bool> {
        let stored = self.store.get(session_id).await?;
        Ok(tokens_match(stored.as_ref(), supplied))
    }
}

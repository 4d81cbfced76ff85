//! Issue Token Use Case

use kernel::id::SessionId;
use std::sync::Arc;

use crate::application::config::CsrfConfig;
use crate::domain::repository::SessionTokenStore;
use crate::domain::value_objects::CsrfToken;
use crate::error::CsrfResult;

/// Output DTO for issue token
#[derive(Debug, Clone)]
pub struct IssueTokenOutput {
    pub token: CsrfToken,
}

/// Generate a fresh token and make it the session's pending token
pub struct IssueTokenUseCase<S>
where
    S: SessionTokenStore,
{
    store: Arc<S>,
    config: Arc<CsrfConfig>,
}

impl<S> IssueTokenUseCase<S>
where
    S: SessionTokenStore,
{
    pub fn new(store: Arc<S>, config: Arc<CsrfConfig>) -> Self {
        Self { store, config }
    }

    pub async fn execute(&self, session_id: SessionId) -> CsrfResult<IssueTokenOutput> {
        let token = CsrfToken::generate(self.config.token_size);

        self.store.set(session_id, token.clone()).await?;

        tracing::info!(
            session_id = %session_id,
            token_bits = self.config.token_size.bits(),
            "Issued CSRF token"
        );

        Ok(IssueTokenOutput { token })
    }
}

//! Repository Traits
//!
//! Interfaces for session token persistence. Implementations live in the
//! infrastructure layer.

use kernel::id::SessionId;

use crate::domain::value_objects::CsrfToken;
use crate::error::CsrfResult;

/// Single-slot token storage keyed by session
///
/// Operations on one session must not observe or disturb any other session.
#[trait_variant::make(SessionTokenStore: Send)]
pub trait LocalSessionTokenStore {
    /// Currently pending token, if any
    async fn get(&self, session_id: SessionId) -> CsrfResult<Option<CsrfToken>>;

    /// Overwrite the pending token, creating the session record if needed
    async fn set(&self, session_id: SessionId, token: CsrfToken) -> CsrfResult<()>;

    /// Drop the pending token
    async fn clear(&self, session_id: SessionId) -> CsrfResult<()>;

    /// Clear the slot atomically if it still holds `expected`.
    /// Returns false when the slot held something else (or nothing).
    async fn consume(&self, session_id: SessionId, expected: &str) -> CsrfResult<bool>;

    /// Remove expired session records, returning how many were dropped
    async fn cleanup_expired(&self) -> CsrfResult<u64>;
}

//! In-memory Session Token Store
//!
//! One mutex guards the whole map, so every operation on a session is
//! serialized and `consume` is a single compare-and-clear.

use chrono::Utc;
use kernel::id::SessionId;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use crate::domain::entities::CsrfSession;
use crate::domain::repository::SessionTokenStore;
use crate::domain::value_objects::CsrfToken;
use crate::error::CsrfResult;

/// Process-local repository; sessions are lost on restart
#[derive(Clone)]
pub struct MemorySessionTokenStore {
    sessions: Arc<Mutex<HashMap<SessionId, CsrfSession>>>,
    session_ttl_ms: i64,
}

impl MemorySessionTokenStore {
    pub fn new(session_ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            session_ttl_ms: session_ttl.as_millis() as i64,
        }
    }

    /// Number of live session records
    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl SessionTokenStore for MemorySessionTokenStore {
    async fn get(&self, session_id: SessionId) -> CsrfResult<Option<CsrfToken>> {
        let mut sessions = self.sessions.lock().await;

        if sessions.get(&session_id).is_some_and(CsrfSession::is_expired) {
            sessions.remove(&session_id);
            return Ok(None);
        }

        Ok(sessions
            .get(&session_id)
            .and_then(|session| session.pending_token.clone()))
    }

    async fn set(&self, session_id: SessionId, token: CsrfToken) -> CsrfResult<()> {
        let mut sessions = self.sessions.lock().await;

        let session = sessions
            .entry(session_id)
            .or_insert_with(|| CsrfSession::new(session_id, self.session_ttl_ms));
        if session.is_expired() {
            *session = CsrfSession::new(session_id, self.session_ttl_ms);
        }
        session.pending_token = Some(token);

        Ok(())
    }

    async fn clear(&self, session_id: SessionId) -> CsrfResult<()> {
        if let Some(session) = self.sessions.lock().await.get_mut(&session_id) {
            session.pending_token = None;
        }
        Ok(())
    }

    async fn consume(&self, session_id: SessionId, expected: &str) -> CsrfResult<bool> {
        let mut sessions = self.sessions.lock().await;

        let Some(session) = sessions.get_mut(&session_id) else {
            return Ok(false);
        };
        if session.is_expired() {
            return Ok(false);
        }

        match &session.pending_token {
            Some(token) if token.matches(expected) => {
                session.pending_token = None;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn cleanup_expired(&self) -> CsrfResult<u64> {
        let now_ms = Utc::now().timestamp_millis();
        let mut sessions = self.sessions.lock().await;

        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired_at(now_ms));
        let removed = (before - sessions.len()) as u64;

        if removed > 0 {
            tracing::info!(sessions = removed, "Cleaned up expired CSRF sessions");
        }

        Ok(removed)
    }
}

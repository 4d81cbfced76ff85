//! Domain Entities

use chrono::{DateTime, Utc};
use kernel::id::SessionId;

use crate::domain::value_objects::CsrfToken;

/// Server-side state of one browser session
///
/// Holds a single pending token slot: generating overwrites it, a spent
/// token empties it.
#[derive(Debug, Clone)]
pub struct CsrfSession {
    pub id: SessionId,
    pub pending_token: Option<CsrfToken>,
    pub created_at: DateTime<Utc>,
    pub expires_at_ms: i64,
}

impl CsrfSession {
    pub fn new(id: SessionId, ttl_ms: i64) -> Self {
        let now = Utc::now();
        Self {
            id,
            pending_token: None,
            created_at: now,
            expires_at_ms: now.timestamp_millis() + ttl_ms,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now().timestamp_millis())
    }

    pub fn is_expired_at(&self, now_ms: i64) -> bool {
        now_ms > self.expires_at_ms
    }
}

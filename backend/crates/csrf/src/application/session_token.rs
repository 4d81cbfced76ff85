//! Signed session cookie values
//!
//! Format: base64url(session id (16 bytes) || HMAC-SHA256(secret, id) (32 bytes)).

use kernel::id::SessionId;
use platform::crypto::{from_base64url, hmac_sha256, to_base64url, verify_hmac_sha256};

const ID_LEN: usize = 16;
const TAG_LEN: usize = 32;

/// Create the cookie value for a session
pub fn create_session_token(session_id: &SessionId, secret: &[u8; 32]) -> String {
    let id_bytes = session_id.as_bytes();
    let signature = hmac_sha256(secret, id_bytes);
    let mut token_data = Vec::with_capacity(ID_LEN + TAG_LEN);
    token_data.extend_from_slice(id_bytes);
    token_data.extend_from_slice(&signature);
    to_base64url(&token_data)
}

/// Verify a cookie value and recover the session id
pub fn verify_session_token(token: &str, secret: &[u8; 32]) -> Option<SessionId> {
    let token_data = from_base64url(token).ok()?;
    if token_data.len() != ID_LEN + TAG_LEN {
        return None;
    }

    let (id_bytes, signature) = token_data.split_at(ID_LEN);
    if !verify_hmac_sha256(secret, id_bytes, signature) {
        return None;
    }

    let id_bytes: [u8; ID_LEN] = id_bytes.try_into().ok()?;
    Some(SessionId::from_bytes(id_bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_own_token() {
        let secret = [9u8; 32];
        let id = SessionId::new();
        let token = create_session_token(&id, &secret);
        assert_eq!(verify_session_token(&token, &secret), Some(id));
    }

    #[test]
    fn test_rejects_other_secret() {
        let id = SessionId::new();
        let token = create_session_token(&id, &[1u8; 32]);
        assert_eq!(verify_session_token(&token, &[2u8; 32]), None);
    }

    #[test]
    fn test_rejects_swapped_id() {
        let secret = [3u8; 32];
        let token = create_session_token(&SessionId::new(), &secret);
        let mut data = from_base64url(&token).unwrap();
        data[0] ^= 0xff;
        assert_eq!(verify_session_token(&to_base64url(&data), &secret), None);
    }

    #[test]
    fn test_rejects_garbage() {
        let secret = [3u8; 32];
        assert_eq!(verify_session_token("", &secret), None);
        assert_eq!(verify_session_token("not base64!", &secret), None);
        assert_eq!(verify_session_token(&to_base64url(&[0u8; 20]), &secret), None);
    }
}

//! API DTOs (Data Transfer Objects)

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::domain::value_objects::CsrfToken;

/// Response for GET /csrf-token
///
/// A single-entry object whose key is the configured response field,
/// e.g. `{"csrfToken":"9f86d081884c7d65..."}`.
#[derive(Debug, Clone)]
pub struct TokenResponse {
    field: String,
    token: String,
}

impl TokenResponse {
    pub fn new(field: &str, token: &CsrfToken) -> Self {
        Self {
            field: field.to_string(),
            token: token.as_str().to_string(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl Serialize for TokenResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.field, &self.token)?;
        map.end()
    }
}

//! Application Configuration
//!
//! Configuration for the CSRF application layer.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use axum::http::HeaderName;
use platform::cookie::CookieConfig;
pub use platform::cookie::SameSite;

use crate::domain::value_objects::TokenSize;

/// Where the gate looks for the token a client sends back
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenSource {
    /// Request header with this name
    Header(String),
    /// Cookie with this name
    Cookie(String),
    /// Top-level string field of a JSON request body
    JsonBody(String),
}

impl Default for TokenSource {
    fn default() -> Self {
        TokenSource::Header("x-csrf-token".to_string())
    }
}

impl fmt::Display for TokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenSource::Header(name) => write!(f, "header:{}", name),
            TokenSource::Cookie(name) => write!(f, "cookie:{}", name),
            TokenSource::JsonBody(field) => write!(f, "body:{}", field),
        }
    }
}

/// Invalid configuration value
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid token source {0:?}, expected header:<name>, cookie:<name> or body:<field>")]
    InvalidTokenSource(String),

    #[error("Invalid token size {0}, expected a multiple of 8 between 64 and 1024")]
    InvalidTokenSize(u16),
}

impl FromStr for TokenSource {
    type Err = ConfigError;

    /// Parses `header:<name>`, `cookie:<name>` or `body:<field>`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidTokenSource(s.to_string());
        let (channel, name) = s.split_once(':').ok_or_else(invalid)?;
        let name = name.trim();
        if name.is_empty() {
            return Err(invalid());
        }

        match channel.trim() {
            "header" if HeaderName::from_bytes(name.as_bytes()).is_ok() => {
                Ok(TokenSource::Header(name.to_string()))
            }
            "cookie" if is_cookie_name(name) => Ok(TokenSource::Cookie(name.to_string())),
            "body" => Ok(TokenSource::JsonBody(name.to_string())),
            _ => Err(invalid()),
        }
    }
}

/// RFC 6265 cookie-name: visible ASCII without separators
fn is_cookie_name(name: &str) -> bool {
    name.bytes()
        .all(|b| b.is_ascii_graphic() && !b"()<>@,;:\\\"/[]?={}".contains(&b))
}

/// CSRF application configuration
#[derive(Debug, Clone)]
pub struct CsrfConfig {
    /// Token length
    pub token_size: TokenSize,
    /// Inbound channel checked by the gate
    pub token_source: TokenSource,
    /// JSON field carrying the token in the issuance response
    pub response_field: String,
    /// Cookie carrying the token copy
    pub token_cookie_name: String,
    /// Token cookie lifetime
    pub token_cookie_ttl: Duration,
    /// Spend the token on successful validation
    pub single_use: bool,
    /// Cookie name for the signed session id
    pub session_cookie_name: String,
    /// Session lifetime (cookie and server record)
    pub session_ttl: Duration,
    /// HMAC key signing session cookies (32 bytes)
    pub session_secret: [u8; 32],
    /// Whether cookies carry the Secure attribute
    pub cookie_secure: bool,
    /// Body size limit when reading a token from the body
    pub max_body_bytes: usize,
}

impl Default for CsrfConfig {
    fn default() -> Self {
        Self {
            token_size: TokenSize::DEFAULT,
            token_source: TokenSource::default(),
            response_field: "csrfToken".to_string(),
            token_cookie_name: "X-csrf-token".to_string(),
            token_cookie_ttl: Duration::from_secs(15 * 60),
            single_use: true,
            session_cookie_name: "sid".to_string(),
            session_ttl: Duration::from_secs(24 * 3600),
            session_secret: [0u8; 32],
            cookie_secure: true,
            max_body_bytes: 64 * 1024,
        }
    }
}

impl CsrfConfig {
    /// Create config with a random session secret (for development)
    pub fn with_random_secret() -> Self {
        use rand::RngCore;
        let mut secret = [0u8; 32];
        rand::rng().fill_bytes(&mut secret);
        Self {
            session_secret: secret,
            ..Default::default()
        }
    }

    /// Create config for development (insecure cookies)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secret()
        }
    }

    /// Set the token size from a raw bit count
    pub fn with_token_size_bits(mut self, bits: u16) -> Result<Self, ConfigError> {
        self.token_size = TokenSize::new(bits).ok_or(ConfigError::InvalidTokenSize(bits))?;
        Ok(self)
    }

    pub fn session_ttl_ms(&self) -> i64 {
        self.session_ttl.as_millis() as i64
    }

    /// Token cookie: short-lived, host-only, strict same-site
    pub fn token_cookie(&self) -> CookieConfig {
        CookieConfig {
            name: self.token_cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: SameSite::Strict,
            path: "/".to_string(),
            domain: None,
            max_age: Some(self.token_cookie_ttl),
        }
    }

    /// Session cookie: SameSite=Lax, lives as long as the session
    pub fn session_cookie(&self) -> CookieConfig {
        CookieConfig {
            name: self.session_cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: SameSite::Lax,
            path: "/".to_string(),
            domain: None,
            max_age: Some(self.session_ttl),
        }
    }
}

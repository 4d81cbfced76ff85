//! Domain Value Objects
//!
//! Immutable value types for the CSRF domain.

use std::fmt;

/// Token size in bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSize(u16);

impl TokenSize {
    pub const DEFAULT: TokenSize = TokenSize(128);
    pub const MIN: u16 = 64;
    pub const MAX: u16 = 1024;

    /// Accepts whole bytes within `[MIN, MAX]`
    pub fn new(bits: u16) -> Option<Self> {
        if (Self::MIN..=Self::MAX).contains(&bits) && bits % 8 == 0 {
            Some(Self(bits))
        } else {
            None
        }
    }

    pub fn bits(&self) -> u16 {
        self.0
    }

    pub fn bytes(&self) -> usize {
        usize::from(self.0 / 8)
    }
}

impl Default for TokenSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Anti-forgery token
///
/// Lowercase hex of `TokenSize::bytes()` random bytes. Only equality is
/// meaningful; use [`CsrfToken::matches`] when comparing against client input.
#[derive(Clone, PartialEq, Eq)]
pub struct CsrfToken(String);

impl CsrfToken {
    /// Fresh token from the OS RNG
    pub fn generate(size: TokenSize) -> Self {
        Self(platform::crypto::random_hex(size.bytes()))
    }

    /// Wrap an existing value; empty strings are not tokens
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        (!value.is_empty()).then_some(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Exact, case-sensitive, constant-time comparison
    pub fn matches(&self, supplied: &str) -> bool {
        platform::crypto::constant_time_eq(self.0.as_bytes(), supplied.as_bytes())
    }
}

// Tokens are secrets; keep them out of logs.
impl fmt::Debug for CsrfToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CsrfToken(<{} chars>)", self.0.len())
    }
}

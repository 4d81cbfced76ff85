//! Cookie Management Infrastructure
//!
//! Builds `Set-Cookie` values and reads cookies back out of request headers.

use axum::http::header::InvalidHeaderValue;
use axum::http::{HeaderMap, HeaderValue, header};
use std::time::Duration;

/// SameSite policy for cookies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    Strict,
    #[default]
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

/// Cookie configuration
///
/// A cookie without `domain` is host-only: browsers send it back only to the
/// exact host that set it.
#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub name: String,
    pub secure: bool,
    pub http_only: bool,
    pub same_site: SameSite,
    pub path: String,
    pub domain: Option<String>,
    pub max_age: Option<Duration>,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: "session".to_string(),
            secure: true,
            http_only: true,
            same_site: SameSite::Lax,
            path: "/".to_string(),
            domain: None,
            max_age: None,
        }
    }
}

impl CookieConfig {
    /// Build Set-Cookie header value
    pub fn build_set_cookie(&self, value: &str) -> String {
        let mut parts = vec![format!("{}={}", self.name, value)];

        if self.http_only {
            parts.push("HttpOnly".to_string());
        }
        if self.secure {
            parts.push("Secure".to_string());
        }
        parts.push(format!("SameSite={}", self.same_site.as_str()));
        parts.push(format!("Path={}", self.path));
        if let Some(domain) = &self.domain {
            parts.push(format!("Domain={}", domain));
        }
        if let Some(max_age) = self.max_age {
            parts.push(format!("Max-Age={}", max_age.as_secs()));
        }

        parts.join("; ")
    }

    /// Build Set-Cookie value that makes the browser drop the cookie
    ///
    /// Keeps name, path, domain and flags so it targets the same cookie.
    pub fn build_delete_cookie(&self) -> String {
        CookieConfig {
            max_age: Some(Duration::ZERO),
            ..self.clone()
        }
        .build_set_cookie("")
    }

    /// Set-Cookie header value for `value`
    pub fn header_value(&self, value: &str) -> Result<HeaderValue, InvalidHeaderValue> {
        HeaderValue::from_str(&self.build_set_cookie(value))
    }

    /// Set-Cookie header value that expires the cookie
    pub fn delete_header_value(&self) -> Result<HeaderValue, InvalidHeaderValue> {
        HeaderValue::from_str(&self.build_delete_cookie())
    }
}

/// Extract a cookie value from headers
///
/// Looks through every `Cookie` header; the first matching pair wins.
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|cookie| {
            let (key, value) = cookie.trim().split_once('=')?;
            (key == name).then(|| value.to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_config_build() {
        let config = CookieConfig {
            name: "X-csrf-token".to_string(),
            secure: true,
            http_only: true,
            same_site: SameSite::Strict,
            path: "/".to_string(),
            domain: None,
            max_age: Some(Duration::from_secs(900)),
        };

        let cookie = config.build_set_cookie("deadbeef");
        assert!(cookie.starts_with("X-csrf-token=deadbeef"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Secure"));
        assert!(cookie.contains("SameSite=Strict"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("Max-Age=900"));
        assert!(!cookie.contains("Domain="));
    }

    #[test]
    fn test_cookie_domain_and_insecure() {
        let config = CookieConfig {
            secure: false,
            domain: Some("example.com".to_string()),
            ..CookieConfig::default()
        };

        let cookie = config.build_set_cookie("v");
        assert!(!cookie.contains("Secure"));
        assert!(cookie.contains("Domain=example.com"));
        assert!(!cookie.contains("Max-Age"));
    }

    #[test]
    fn test_delete_cookie_matches_original_attributes() {
        let config = CookieConfig {
            name: "X-csrf-token".to_string(),
            same_site: SameSite::Strict,
            domain: Some("example.com".to_string()),
            max_age: Some(Duration::from_secs(900)),
            ..CookieConfig::default()
        };
        assert_eq!(
            config.build_delete_cookie(),
            "X-csrf-token=; HttpOnly; Secure; SameSite=Strict; Path=/; Domain=example.com; Max-Age=0"
        );
        assert!(config.delete_header_value().is_ok());
    }

    #[test]
    fn test_header_value_rejects_control_chars() {
        let config = CookieConfig::default();
        assert!(config.header_value("ok").is_ok());
        assert!(config.header_value("bad\nvalue").is_err());
    }

    #[test]
    fn test_extract_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("foo=bar; sid=abc123; other=xyz"),
        );
        headers.append(header::COOKIE, HeaderValue::from_static("late=1"));

        assert_eq!(extract_cookie(&headers, "sid"), Some("abc123".to_string()));
        assert_eq!(extract_cookie(&headers, "late"), Some("1".to_string()));
        assert_eq!(extract_cookie(&headers, "missing"), None);
    }

    #[test]
    fn test_extract_cookie_keeps_padding() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("tok=ab=="));
        assert_eq!(extract_cookie(&headers, "tok"), Some("ab==".to_string()));
    }
}

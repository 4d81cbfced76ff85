//! Domain Services
//!
//! Pure synchronizer-token comparison.

use crate::domain::value_objects::CsrfToken;

/// Both sides must be present and non-empty, and equal byte for byte
pub fn tokens_match(stored: Option<&CsrfToken>, supplied: Option<&str>) -> bool {
    match (stored, supplied) {
        (Some(stored), Some(supplied)) if !supplied.is_empty() => stored.matches(supplied),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_sides_never_match() {
        let token = CsrfToken::new("abc").unwrap();
        assert!(!tokens_match(None, Some("abc")));
        assert!(!tokens_match(Some(&token), None));
        assert!(!tokens_match(Some(&token), Some("")));
        assert!(!tokens_match(None, None));
    }

    #[test]
    fn test_exact_match_only() {
        let token = CsrfToken::new("0a1b2c3d").unwrap();
        assert!(tokens_match(Some(&token), Some("0a1b2c3d")));
        assert!(!tokens_match(Some(&token), Some("0A1B2C3D")));
        assert!(!tokens_match(Some(&token), Some("0a1b2c3")));
        assert!(!tokens_match(Some(&token), Some(" 0a1b2c3d")));
    }
}

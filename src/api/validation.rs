use std::sync::LazyLock;

use super::ApiError;

/// Same permissive shape check the public site applies client-side.
static EMAIL_RE: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

pub const TAGLINE_MAX_CHARS: usize = 200;
pub const TAGLINE_MAX_WORDS: usize = 50;

#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn validate_tagline(tagline: &str) -> Result<(), ApiError> {
    if tagline.chars().count() > TAGLINE_MAX_CHARS {
        return Err(ApiError::validation(format!(
            "Tagline must be {} characters or less",
            TAGLINE_MAX_CHARS
        )));
    }
    if tagline.split_whitespace().count() > TAGLINE_MAX_WORDS {
        return Err(ApiError::validation(format!(
            "Tagline must be {} words or less",
            TAGLINE_MAX_WORDS
        )));
    }
    Ok(())
}

/// Treat absent and empty strings the same way the original partial-update
/// contract does: both keep the stored value.
#[must_use]
pub fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("first.last+tag@studio.example.org"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("missing@tld"));
        assert!(!is_valid_email("spaces in@address.com"));
        assert!(!is_valid_email("@no-local.com"));
    }

    #[test]
    fn tagline_limits() {
        assert!(validate_tagline("A short tagline").is_ok());
        assert!(validate_tagline(&"x".repeat(201)).is_err());
        assert!(validate_tagline(&"word ".repeat(51)).is_err());
    }

    #[test]
    fn present_filters_empty() {
        assert_eq!(present(Some("value".to_string())), Some("value".to_string()));
        assert_eq!(present(Some("   ".to_string())), None);
        assert_eq!(present(Some(String::new())), None);
        assert_eq!(present(None), None);
    }
}

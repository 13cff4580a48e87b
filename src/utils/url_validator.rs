//! Validation of original URLs accepted for shortening.
//!
//! Accepted URLs are stored in their serialized [`Url`] form: host lowercased,
//! non-ASCII and spaces percent-encoded, IDN hosts in punycode. That string is
//! what the key is derived from and what a redirect sends as `Location`, so it
//! must always be a valid header value.

use url::Url;

/// Longest accepted original URL, in bytes.
pub const MAX_URL_LENGTH: usize = 2048;

/// Errors that can occur during URL validation.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlValidationError {
    #[error("URL must not be empty")]
    Empty,

    #[error("URL exceeds {MAX_URL_LENGTH} characters")]
    TooLong,

    #[error("URL must not contain control characters")]
    ControlCharacter,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must include a host")]
    MissingHost,
}

/// Validates an absolute HTTP(S) URL and returns its normalized form.
///
/// # Security
///
/// Rejects potentially dangerous protocols like `javascript:`, `data:`, `file:`, etc.
/// Rejects tabs, newlines and other control characters, which the parser
/// would otherwise drop silently.
///
/// # Errors
///
/// Returns a [`UrlValidationError`] describing the first rule violated.
pub fn validate_url(input: &str) -> Result<String, UrlValidationError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(UrlValidationError::Empty);
    }

    if trimmed.chars().any(char::is_control) {
        return Err(UrlValidationError::ControlCharacter);
    }

    if trimmed.len() > MAX_URL_LENGTH {
        return Err(UrlValidationError::TooLong);
    }

    let url = Url::parse(trimmed).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(UrlValidationError::MissingHost);
    }

    // Percent-encoding can push a URL over the limit.
    if url.as_str().len() > MAX_URL_LENGTH {
        return Err(UrlValidationError::TooLong);
    }

    Ok(url.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_valid_url_is_normalized() {
        assert_eq!(
            validate_url("https://example.com").unwrap(),
            "https://example.com/"
        );
        assert_eq!(
            validate_url("http://Example.com:8080/Path?q=1#frag").unwrap(),
            "http://example.com:8080/Path?q=1#frag"
        );
    }

    #[test]
    fn test_normalization_is_stable() {
        let once = validate_url("https://Example.com/caf\u{e9} menu?q=a b").unwrap();
        assert_eq!(validate_url(&once).unwrap(), once);
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        assert_eq!(
            validate_url("  https://example.com/a  ").unwrap(),
            "https://example.com/a"
        );
    }

    #[test]
    fn test_non_ascii_and_spaces_are_percent_encoded() {
        assert_eq!(
            validate_url("https://example.com/caf\u{e9}").unwrap(),
            "https://example.com/caf%C3%A9"
        );
        assert_eq!(
            validate_url("https://example.com/a b").unwrap(),
            "https://example.com/a%20b"
        );
    }

    #[test]
    fn test_control_characters_rejected() {
        for input in [
            "https://exa\nmple.com/x",
            "https://example.com/\tpath",
            "https://example.com/a\rb",
            "https://example.com/\u{7f}",
        ] {
            assert_eq!(
                validate_url(input),
                Err(UrlValidationError::ControlCharacter),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_accepted_urls_are_valid_location_headers() {
        for input in [
            "https://example.com/caf\u{e9}",
            "https://example.com/a b?x=\"y\"",
            "https://ex\u{e4}mple.com/\u{65e5}\u{672c}",
            "http://example.com/path#frag ment",
        ] {
            let url = validate_url(input).unwrap();
            assert!(
                HeaderValue::from_str(&url).is_ok(),
                "{url:?} is not a valid header value"
            );
            assert!(url.is_ascii());
        }
    }

    #[test]
    fn test_empty_rejected() {
        assert_eq!(validate_url("   "), Err(UrlValidationError::Empty));
    }

    #[test]
    fn test_relative_rejected() {
        assert!(matches!(
            validate_url("/just/a/path"),
            Err(UrlValidationError::InvalidFormat(_))
        ));
        assert!(matches!(
            validate_url("not-a-url"),
            Err(UrlValidationError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_dangerous_schemes_rejected() {
        for input in [
            "javascript:alert(1)",
            "data:text/html,hi",
            "file:///etc/passwd",
            "ftp://example.com",
        ] {
            assert_eq!(
                validate_url(input),
                Err(UrlValidationError::UnsupportedProtocol),
                "{input} should be rejected"
            );
        }
    }

    #[test]
    fn test_too_long_rejected() {
        let long = format!("https://example.com/{}", "a".repeat(MAX_URL_LENGTH));
        assert_eq!(validate_url(&long), Err(UrlValidationError::TooLong));
    }

    #[test]
    fn test_too_long_after_encoding_rejected() {
        let long = format!("https://example.com/{}", "\u{e9}".repeat(700));
        assert!(long.len() <= MAX_URL_LENGTH);
        assert_eq!(validate_url(&long), Err(UrlValidationError::TooLong));
    }
}

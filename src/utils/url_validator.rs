//! Destination URL validation.

use url::Url;

/// Errors that can occur while validating a destination URL.
#[derive(Debug, thiserror::Error)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must include a host")]
    MissingHost,
}

/// Parses a destination URL and checks it can be probed and redirected to.
///
/// The URL must be absolute, use `http` or `https`, and name a host.
/// Potentially dangerous schemes such as `javascript:` or `file:` are
/// rejected.
///
/// # Errors
///
/// Returns [`UrlValidationError::InvalidFormat`] for malformed URLs,
/// [`UrlValidationError::UnsupportedProtocol`] for non-HTTP(S) schemes and
/// [`UrlValidationError::MissingHost`] when no host is present.
pub fn parse_destination(input: &str) -> Result<Url, UrlValidationError> {
    let url = Url::parse(input.trim())
        .map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(UrlValidationError::MissingHost);
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_http_and_https() {
        assert!(parse_destination("https://example.com").is_ok());
        assert!(parse_destination("http://example.com/path?q=1").is_ok());
        assert!(parse_destination("https://localhost:8080/x").is_ok());
    }

    #[test]
    fn test_rejects_relative() {
        assert!(matches!(
            parse_destination("example.com"),
            Err(UrlValidationError::InvalidFormat(_))
        ));
        assert!(parse_destination("/just/a/path").is_err());
        assert!(parse_destination("").is_err());
    }

    #[test]
    fn test_rejects_other_schemes() {
        assert!(matches!(
            parse_destination("ftp://example.com"),
            Err(UrlValidationError::UnsupportedProtocol)
        ));
        assert!(matches!(
            parse_destination("javascript:alert(1)"),
            Err(UrlValidationError::UnsupportedProtocol)
        ));
        assert!(parse_destination("file:///etc/passwd").is_err());
    }
}

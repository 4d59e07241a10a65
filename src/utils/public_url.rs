//! Public base URL extraction from HTTP request headers.

use crate::AppError;
use axum::http::{HeaderMap, Uri, header};
use serde_json::json;

/// Scheme used when the request does not say how it reached us.
const DEFAULT_SCHEME: &str = "https";

/// Builds the public base (`scheme://host`) short links are served from.
///
/// The host is taken verbatim from the `Host` header, port included. HTTP/2
/// requests carry it in the `:authority` pseudo-header instead, which ends
/// up in the request URI, so `uri` is consulted when `Host` is absent. The
/// scheme comes from `X-Forwarded-Proto` when a proxy sets it and falls back
/// to `https` otherwise.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if:
/// - Neither a `Host` header nor a URI authority is present
/// - The `Host` header contains invalid UTF-8
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert(header::HOST, "brief.io:8080".parse().unwrap());
///
/// assert_eq!(public_base(&headers, &Uri::default()).unwrap(), "https://brief.io:8080");
/// ```
pub fn public_base(headers: &HeaderMap, uri: &Uri) -> Result<String, AppError> {
    let host = match headers.get(header::HOST) {
        Some(value) => value
            .to_str()
            .map_err(|_| AppError::bad_request("Invalid Host header", json!({})))?
            .trim(),
        None => uri.authority().map(|a| a.as_str()).unwrap_or_default(),
    };

    if host.is_empty() {
        return Err(AppError::bad_request("Missing Host header", json!({})));
    }

    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| matches!(*v, "http" | "https"))
        .unwrap_or(DEFAULT_SCHEME);

    Ok(format!("{scheme}://{host}"))
}

/// Joins a public base and a hash into the full redirect URL.
pub fn short_url(base: &str, hash: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), hash)
}

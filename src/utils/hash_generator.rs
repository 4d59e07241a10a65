//! Short hash generation and validation of caller-supplied hashes.
//!
//! Generated hashes are 7 URL-safe characters derived from a SHA-256 digest
//! over the request identifier, the destination URL and a monotonically
//! increasing counter. The counter makes every pre-image distinct, so a
//! retry after a collision always produces a fresh candidate. Uniqueness is
//! still enforced by the database; see
//! [`crate::application::services::UrlService`].

use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::AppError;
use base64::Engine as _;
use regex::Regex;
use serde_json::json;
use sha2::{Digest, Sha256};
use std::sync::LazyLock;

/// Length of a generated hash in characters.
pub const HASH_LENGTH: usize = 7;

/// Maximum length of a caller-supplied hash.
const MAX_CUSTOM_HASH_LENGTH: usize = 64;

static CUSTOM_HASH_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").unwrap());

/// Hashes that collide with top-level routes.
const RESERVED_HASHES: &[&str] = &["api", "health"];

/// Generates short hashes from an injected counter.
///
/// One generator is shared by every request; the counter is advanced with a
/// single `fetch_add`, so concurrent callers never observe the same value.
#[derive(Debug)]
pub struct HashGenerator {
    counter: AtomicU64,
}

impl HashGenerator {
    /// Creates a generator whose counter starts at `initial`.
    pub fn new(initial: u64) -> Self {
        Self {
            counter: AtomicU64::new(initial),
        }
    }

    /// Derives a 7-character URL-safe hash for `id` and `url`.
    ///
    /// Identical inputs yield different hashes on every call because the
    /// counter contributes to the pre-image.
    pub fn generate(&self, id: &str, url: &str) -> String {
        let count = self.counter.fetch_add(1, Ordering::Relaxed);

        let mut hasher = Sha256::new();
        hasher.update(id.as_bytes());
        hasher.update(url.as_bytes());
        hasher.update(count.to_string().as_bytes());
        let digest = hasher.finalize();

        let mut encoded = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(digest);
        encoded.truncate(HASH_LENGTH);
        encoded
    }

    /// Returns the next counter value without advancing it.
    pub fn current(&self) -> u64 {
        self.counter.load(Ordering::Relaxed)
    }
}

impl Default for HashGenerator {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Validates a caller-supplied hash.
///
/// # Rules
///
/// - Length: 1-64 characters
/// - Allowed characters: ASCII letters, digits, `-` and `_`
/// - Cannot be a reserved route segment
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_custom_hash(hash: &str) -> Result<(), AppError> {
    if hash.is_empty() || hash.len() > MAX_CUSTOM_HASH_LENGTH {
        return Err(AppError::bad_request(
            "Hash must be 1-64 characters",
            json!({ "provided_length": hash.len() }),
        ));
    }

    if !CUSTOM_HASH_REGEX.is_match(hash) {
        return Err(AppError::bad_request(
            "Hash can only contain letters, digits, hyphens and underscores",
            json!({ "hash": hash }),
        ));
    }

    if RESERVED_HASHES.contains(&hash) {
        return Err(AppError::bad_request(
            "This hash is reserved",
            json!({ "hash": hash }),
        ));
    }

    Ok(())
}

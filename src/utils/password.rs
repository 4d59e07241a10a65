//! Password hashing with argon2 and a per-account random salt.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use serde_json::json;

use crate::error::AppError;

/// Result of hashing a password: the PHC string and the salt it embeds.
#[derive(Debug, Clone)]
pub struct HashedPassword {
    pub hash: String,
    pub salt: String,
}

/// Hashes `password` with a freshly generated salt.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if argon2 rejects the input.
pub fn hash_password(password: &str) -> Result<HashedPassword, AppError> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::internal("Could not hash password", json!({ "reason": e.to_string() })))?
        .to_string();

    Ok(HashedPassword {
        hash,
        salt: salt.as_str().to_string(),
    })
}

/// Checks `password` against a stored hash and salt.
///
/// Returns `false` for a wrong password, a malformed stored hash, or a hash
/// that was not derived with `salt`.
pub fn verify_password(password: &str, salt: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };

    if parsed.salt.map(|s| s.as_str()) != Some(salt) {
        return false;
    }

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

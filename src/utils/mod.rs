//! Utility functions shared across layers.
//!
//! - [`hash_generator`] - Short hash generation and caller hash validation
//! - [`password`] - Argon2 password hashing and verification
//! - [`public_url`] - Public base URL extraction from HTTP headers
//! - [`url_validator`] - Destination URL validation

pub mod hash_generator;
pub mod password;
pub mod public_url;
pub mod url_validator;

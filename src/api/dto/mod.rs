//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input validation. Successful responses are wrapped in
//! [`response::ApiResponse`].

pub mod health;
pub mod response;
pub mod url;
pub mod user;

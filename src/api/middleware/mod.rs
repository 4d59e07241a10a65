//! HTTP middleware and request extractors.
//!
//! Provides bearer token authentication, validated JSON bodies and request
//! tracing.

pub mod auth;
pub mod json;
pub mod tracing;

pub use auth::{AdminUser, AuthUser, MaybeUser};
pub use json::ValidJson;

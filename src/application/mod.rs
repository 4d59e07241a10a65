//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! validation, and business rules. Services consume repository traits and provide
//! a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::auth_service::AuthService`] - Session token issuance and verification
//! - [`services::user_service::UserService`] - Accounts, login, password and lock management
//! - [`services::url_service::UrlService`] - Link shortening, redirects and link management

pub mod services;

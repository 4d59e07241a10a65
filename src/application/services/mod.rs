//! Business logic services for the application layer.

pub mod auth_service;
pub mod url_service;
pub mod user_service;

pub use auth_service::{AuthService, Claims, TokenError};
pub use url_service::UrlService;
pub use user_service::UserService;

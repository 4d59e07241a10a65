//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{AuthService, UrlService, UserService};

#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub user_service: Arc<UserService>,
    pub url_service: Arc<UrlService>,
    /// Base of returned short URLs; `None` derives it from request headers.
    pub public_base_url: Option<String>,
}

impl AppState {
    pub fn new(
        auth: Arc<AuthService>,
        user_service: Arc<UserService>,
        url_service: Arc<UrlService>,
        public_base_url: Option<String>,
    ) -> Self {
        Self {
            auth,
            user_service,
            url_service,
            public_base_url,
        }
    }
}

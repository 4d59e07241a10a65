//! Bearer token authentication extractors.
//!
//! Handlers state the trust tier they need by taking one of these as an
//! argument:
//!
//! - [`MaybeUser`] - token optional; a token that is present must be valid
//! - [`AuthUser`] - any authenticated account
//! - [`AdminUser`] - authenticated account with the admin role
//!
//! # Header Format
//!
//! ```text
//! Authorization: Bearer <token>
//! Authorization: <token>
//! Token: <token>
//! ```

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_auth::AuthBearer;
use serde_json::json;

use crate::application::services::Claims;
use crate::error::AppError;
use crate::state::AppState;

/// Fallback header for clients that cannot set `Authorization`.
const TOKEN_HEADER: &str = "token";

/// Claims of an authenticated caller.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

/// Claims of an authenticated administrator.
#[derive(Debug, Clone)]
pub struct AdminUser(pub Claims);

/// Claims of the caller, if a token was sent.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<Claims>);

impl std::ops::Deref for AuthUser {
    type Target = Claims;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::ops::Deref for AdminUser {
    type Target = Claims;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Finds the raw token in the request headers, if any.
async fn bearer_token(parts: &mut Parts) -> Option<String> {
    if let Ok(AuthBearer(token)) = AuthBearer::from_request_parts(parts, &()).await {
        let token = token.trim();
        if !token.is_empty() {
            return Some(token.to_string());
        }
    }

    [axum::http::header::AUTHORIZATION.as_str(), TOKEN_HEADER]
        .into_iter()
        .filter_map(|name| parts.headers.get(name))
        .filter_map(|value| value.to_str().ok())
        .map(str::trim)
        .find(|value| !value.is_empty() && !value.starts_with("Bearer"))
        .map(str::to_string)
}

fn missing_token() -> AppError {
    AppError::unauthorized(
        "Unauthorized",
        json!({ "reason": "Authorization header is missing or invalid" }),
    )
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).await.ok_or_else(missing_token)?;
        let claims = state.auth.verify(&token)?;

        Ok(AuthUser(claims))
    }
}

impl FromRequestParts<AppState> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(claims) = AuthUser::from_request_parts(parts, state).await?;

        if !claims.is_admin() {
            tracing::warn!(user_id = %claims.sub, "Non-admin attempted admin action");
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({ "reason": "admin role required" }),
            ));
        }

        Ok(AdminUser(claims))
    }
}

impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match bearer_token(parts).await {
            Some(token) => Ok(MaybeUser(Some(state.auth.verify(&token)?))),
            None => Ok(MaybeUser(None)),
        }
    }
}

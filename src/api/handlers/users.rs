//! Handlers for user endpoints.

use axum::extract::{Path, State};
use serde_json::{Value, json};

use crate::api::dto::response::ApiResponse;
use crate::api::dto::user::{
    ForgotPasswordRequest, LoginRequest, RegisterRequest, ResetPasswordRequest, SessionResponse,
    UpdateUserRequest, UserResponse,
};
use crate::api::middleware::{AdminUser, AuthUser, ValidJson};
use crate::error::AppError;
use crate::state::AppState;

/// Registers an account and returns a session token.
///
/// # Endpoint
///
/// `POST /api/v1/users`
///
/// # Request Body
///
/// ```json
/// { "firstname": "Ada", "lastname": "Lovelace", "email": "ada@example.com", "password": "password1" }
/// ```
///
/// # Response Codes
///
/// - **201 Created**: `{ token, user }`
/// - **400 Bad Request**: validation failed
/// - **409 Conflict**: email already registered
pub async fn register_handler(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<RegisterRequest>,
) -> Result<ApiResponse<SessionResponse>, AppError> {
    let session = state.user_service.register(req.into()).await?;

    Ok(ApiResponse::created("user created successfully", session.into()))
}

/// `POST /api/v1/users/login`
pub async fn login_handler(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<LoginRequest>,
) -> Result<ApiResponse<SessionResponse>, AppError> {
    let session = state.user_service.login(&req.email, &req.password).await?;

    Ok(ApiResponse::ok("login successful", session.into()))
}

/// `POST /api/v1/users/forgot-password`
pub async fn forgot_password_handler(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<ForgotPasswordRequest>,
) -> Result<ApiResponse<Value>, AppError> {
    state.user_service.forgot_password(&req.email).await?;

    Ok(ApiResponse::ok(
        "password reset request received",
        json!({ "email": req.email }),
    ))
}

/// `GET /api/v1/users` - the caller's own account.
pub async fn get_me_handler(
    State(state): State<AppState>,
    caller: AuthUser,
) -> Result<ApiResponse<UserResponse>, AppError> {
    let account = state.user_service.me(&caller).await?;
    Ok(ApiResponse::ok("user fetched successfully", account.into()))
}

/// `PATCH /api/v1/users` - updates the caller's first and last name.
pub async fn update_me_handler(
    State(state): State<AppState>,
    caller: AuthUser,
    ValidJson(req): ValidJson<UpdateUserRequest>,
) -> Result<ApiResponse<UserResponse>, AppError> {
    let account = state.user_service.update_me(&caller, req.into()).await?;
    Ok(ApiResponse::ok("user updated successfully", account.into()))
}

/// `PATCH /api/v1/users/reset-password`
pub async fn reset_password_handler(
    State(state): State<AppState>,
    caller: AuthUser,
    ValidJson(req): ValidJson<ResetPasswordRequest>,
) -> Result<ApiResponse<UserResponse>, AppError> {
    let account = state
        .user_service
        .reset_password(&caller, &req.password)
        .await?;

    Ok(ApiResponse::ok("password reset successfully", account.into()))
}

/// `GET /api/v1/users/get-all` (admin)
pub async fn list_users_handler(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<ApiResponse<Vec<UserResponse>>, AppError> {
    let accounts = state.user_service.list().await?;

    Ok(ApiResponse::ok(
        "users fetched successfully",
        accounts.into_iter().map(Into::into).collect(),
    ))
}

/// `GET /api/v1/users/{idOrEmail}` (admin)
pub async fn get_user_handler(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id_or_email): Path<String>,
) -> Result<ApiResponse<UserResponse>, AppError> {
    let account = state.user_service.get(&id_or_email).await?;
    Ok(ApiResponse::ok("user fetched successfully", account.into()))
}

/// `PATCH /api/v1/users/{idOrEmail}` (admin)
pub async fn update_user_handler(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id_or_email): Path<String>,
    ValidJson(req): ValidJson<UpdateUserRequest>,
) -> Result<ApiResponse<UserResponse>, AppError> {
    let account = state
        .user_service
        .update(&id_or_email, req.into())
        .await?;

    Ok(ApiResponse::ok("user updated successfully", account.into()))
}

/// `PATCH /api/v1/users/lock/{idOrEmail}` (admin)
pub async fn lock_user_handler(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id_or_email): Path<String>,
) -> Result<ApiResponse<UserResponse>, AppError> {
    let account = state.user_service.lock(&id_or_email).await?;
    Ok(ApiResponse::ok("user locked successfully", account.into()))
}

/// `PATCH /api/v1/users/unlock/{idOrEmail}` (admin)
pub async fn unlock_user_handler(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(id_or_email): Path<String>,
) -> Result<ApiResponse<UserResponse>, AppError> {
    let account = state.user_service.unlock(&id_or_email).await?;
    Ok(ApiResponse::ok("user unlocked successfully", account.into()))
}

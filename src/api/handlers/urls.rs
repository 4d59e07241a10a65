//! Handlers for link endpoints.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, Uri},
};
use serde_json::json;
use uuid::Uuid;

use crate::api::dto::response::ApiResponse;
use crate::api::dto::url::{ShortenRequest, UrlResponse};
use crate::api::middleware::{AdminUser, AuthUser, MaybeUser, ValidJson};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::public_url::public_base;

fn parse_id(value: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(value)
        .map_err(|_| AppError::not_found("Url not found", json!({ "id": value })))
}

/// Shortens a URL.
///
/// # Endpoint
///
/// `POST /api/v1/url/shorten`
///
/// # Request Body
///
/// ```json
/// { "long_url": "https://example.com/page", "hash": "promo" }
/// ```
///
/// `hash` is optional. Without a token the link is owned by the admin account.
///
/// # Response Codes
///
/// - **201 Created**: link stored; `data.hash` is the full short URL
/// - **400 Bad Request**: invalid or unreachable URL, invalid hash
/// - **401 Unauthorized**: a token was sent but is invalid or expired
/// - **409 Conflict**: the requested hash is taken
pub async fn shorten_handler(
    State(state): State<AppState>,
    MaybeUser(caller): MaybeUser,
    headers: HeaderMap,
    uri: Uri,
    ValidJson(req): ValidJson<ShortenRequest>,
) -> Result<ApiResponse<UrlResponse>, AppError> {
    let public_base = match &state.public_base_url {
        Some(base) => base.clone(),
        None => public_base(&headers, &uri)?,
    };

    let link = state
        .url_service
        .shorten(&req.long_url, req.hash, caller.as_ref(), &public_base)
        .await?;

    Ok(ApiResponse::created("url shortened successfully", link.into()))
}

/// `GET /api/v1/url` - lists the caller's links.
pub async fn list_my_urls_handler(
    State(state): State<AppState>,
    caller: AuthUser,
) -> Result<ApiResponse<Vec<UrlResponse>>, AppError> {
    let links = state.url_service.list_mine(&caller).await?;

    Ok(ApiResponse::ok(
        "urls fetched successfully",
        links.into_iter().map(Into::into).collect(),
    ))
}

/// `DELETE /api/v1/url/{id}` - deletes a link owned by the caller (any link for admins).
pub async fn delete_url_handler(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<String>,
) -> Result<ApiResponse<UrlResponse>, AppError> {
    let id = parse_id(&id)?;
    let link = state.url_service.delete(&caller, id).await?;

    Ok(ApiResponse::ok("url deleted successfully", link.into()))
}

/// `GET /api/v1/url/get-all` - lists every link (admin).
pub async fn list_all_urls_handler(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<ApiResponse<Vec<UrlResponse>>, AppError> {
    let links = state.url_service.list_all().await?;

    Ok(ApiResponse::ok(
        "urls fetched successfully",
        links.into_iter().map(Into::into).collect(),
    ))
}

/// `GET /api/v1/url/{user_id}` - lists links owned by a user (admin).
pub async fn list_user_urls_handler(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(user_id): Path<String>,
) -> Result<ApiResponse<Vec<UrlResponse>>, AppError> {
    let user_id = Uuid::parse_str(&user_id)
        .map_err(|_| AppError::not_found("User not found", json!({ "user_id": user_id })))?;

    let links = state.url_service.list_by_user(user_id).await?;

    Ok(ApiResponse::ok(
        "urls fetched successfully",
        links.into_iter().map(Into::into).collect(),
    ))
}

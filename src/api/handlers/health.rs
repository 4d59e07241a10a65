//! Handlers for liveness and health endpoints.

use axum::http::StatusCode;
use tracing::debug;

use crate::api::dto::health::{HealthResponse, PingRequest};
use crate::api::dto::response::ApiResponse;
use crate::api::middleware::ValidJson;

/// `GET /` - plain-text liveness probe.
pub async fn root_handler() -> (StatusCode, &'static str) {
    (StatusCode::OK, "Brief URL shortener is running")
}

/// Reports service health.
///
/// # Endpoint
///
/// `GET /api/v1/health`
pub async fn health_handler() -> ApiResponse<HealthResponse> {
    debug!("Health check");

    ApiResponse::ok(
        "ping successful",
        HealthResponse {
            status: "healthy",
            version: env!("CARGO_PKG_VERSION"),
        },
    )
}

/// Echoes the posted message back.
///
/// # Endpoint
///
/// `POST /api/v1/health`
///
/// # Request Body
///
/// ```json
/// { "message": "hello" }
/// ```
pub async fn ping_handler(ValidJson(req): ValidJson<PingRequest>) -> ApiResponse<String> {
    debug!("Ping received");
    ApiResponse::ok("ping successful", req.message)
}

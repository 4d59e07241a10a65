//! DTOs for health check endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /api/v1/health`.
#[derive(Debug, Deserialize, Validate)]
pub struct PingRequest {
    #[validate(length(min = 1, message = "message is required"))]
    pub message: String,
}

/// Health status returned by `GET /api/v1/health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /`         - Liveness text (public)
//! - `GET  /{hash}`   - Short link redirect (public)
//! - `/api/v1/*`      - JSON API, see [`crate::api::routes::api_routes`]
//!
//! Unknown paths get the standard failure envelope with `404`.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Any origin; `Authorization` and `Token` headers allowed
//! - **Path normalization** - Trailing slash handling

use axum::Router;
use axum::http::{HeaderName, Method, Uri, header};
use axum::routing::get;
use serde_json::json;
use tower::Layer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

use crate::api;
use crate::api::handlers::{redirect_handler, root_handler};
use crate::api::middleware::tracing;
use crate::error::AppError;
use crate::state::AppState;

async fn not_found_handler(uri: Uri) -> AppError {
    AppError::not_found("Route not found", json!({ "path": uri.path() }))
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([
            header::ACCEPT,
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static("token"),
        ])
}

/// Builds the router with all routes and middleware but no path normalization.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/{hash}", get(redirect_handler))
        .nest("/api/v1", api::routes::api_routes())
        .fallback(not_found_handler)
        .with_state(state)
        .layer(cors_layer())
        .layer(tracing::layer())
}

/// Constructs the application router, trimming trailing slashes before routing.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(build_router(state))
}

//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::Redirect,
};
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short hash to its destination.
///
/// # Endpoint
///
/// `GET /{hash}`
///
/// # Errors
///
/// Returns 404 Not Found if no link has this hash.
pub async fn redirect_handler(
    State(state): State<AppState>,
    Path(hash): Path<String>,
) -> Result<Redirect, AppError> {
    let link = state.url_service.redirect(&hash).await?;

    debug!(hash = %hash, destination = %link.long_url, "Redirecting");

    Ok(Redirect::temporary(&link.long_url))
}

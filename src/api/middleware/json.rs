//! JSON body extractor with validation.

use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use serde_json::json;
use validator::Validate;

use crate::error::AppError;

/// Deserializes a JSON body and runs its `validator` rules.
///
/// Malformed bodies and failed validation both reject with
/// [`AppError::Validation`], rendered as the standard failure envelope.
#[derive(Debug, Clone)]
pub struct ValidJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|e| {
            AppError::bad_request(
                "Failed to parse request body",
                json!({ "reason": e.body_text() }),
            )
        })?;

        value.validate()?;

        Ok(ValidJson(value))
    }
}

//! DTOs for link endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::entities::ShortLink;

/// Request to shorten a URL.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    #[validate(length(min = 1, message = "long_url is required"))]
    pub long_url: String,

    /// Optional caller-chosen hash. Empty is treated as absent.
    #[serde(default)]
    pub hash: Option<String>,
}

/// A stored short link.
///
/// `hash` is the bare token in listings and the full public URL in the
/// shorten response.
#[derive(Debug, Serialize)]
pub struct UrlResponse {
    pub id: Uuid,
    pub long_url: String,
    pub hash: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<ShortLink> for UrlResponse {
    fn from(link: ShortLink) -> Self {
        Self {
            id: link.id,
            long_url: link.long_url,
            hash: link.hash,
            user_id: link.user_id,
            created_at: link.created_at,
        }
    }
}

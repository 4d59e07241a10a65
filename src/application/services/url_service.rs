//! Short link creation, resolution and management.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::auth_service::Claims;
use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::ShortLinkRepository;
use crate::error::AppError;
use crate::infrastructure::probe::UrlProbe;
use crate::utils::hash_generator::{HashGenerator, validate_custom_hash};
use crate::utils::public_url::short_url;
use crate::utils::url_validator::parse_destination;

/// Default cap on generated-hash insert attempts per shorten call.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

/// Service for shortening and resolving links.
///
/// Generated hashes are not checked for existence before insert: the unique
/// constraint on `hash` decides, and a conflict on a generated hash triggers
/// another attempt with the next counter value.
pub struct UrlService {
    links: Arc<dyn ShortLinkRepository>,
    probe: Arc<dyn UrlProbe>,
    generator: Arc<HashGenerator>,
    default_owner: Uuid,
    max_attempts: u32,
}

impl UrlService {
    /// Creates a new URL service.
    ///
    /// # Arguments
    ///
    /// - `default_owner` - account that owns links shortened anonymously
    /// - `max_attempts` - insert attempts before a generated-hash shorten gives up
    pub fn new(
        links: Arc<dyn ShortLinkRepository>,
        probe: Arc<dyn UrlProbe>,
        generator: Arc<HashGenerator>,
        default_owner: Uuid,
        max_attempts: u32,
    ) -> Self {
        Self {
            links,
            probe,
            generator,
            default_owner,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Current hash generator counter, for persistence at shutdown.
    pub fn counter(&self) -> u64 {
        self.generator.current()
    }

    /// Shortens `long_url` and stores the link.
    ///
    /// The stored destination is the parsed form of `long_url`, the same URL
    /// the liveness probe was sent to. The returned record's `hash` is the
    /// full public redirect URL built from `public_base`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if:
    /// - The URL is not an absolute http(s) URL
    /// - The destination does not answer a `HEAD` request with 2xx
    /// - The caller-supplied hash has an invalid shape
    ///
    /// Returns [`AppError::Conflict`] if the caller-supplied hash exists.
    /// Returns [`AppError::Internal`] if every generated hash collided.
    pub async fn shorten(
        &self,
        long_url: &str,
        custom_hash: Option<String>,
        caller: Option<&Claims>,
        public_base: &str,
    ) -> Result<ShortLink, AppError> {
        let destination = parse_destination(long_url).map_err(|e| {
            AppError::bad_request(
                format!("Invalid url specified: '{long_url}'"),
                json!({ "reason": e.to_string() }),
            )
        })?;

        self.probe.check(&destination).await.map_err(|e| {
            AppError::bad_request(
                format!("Invalid url specified: '{long_url}'"),
                json!({ "reason": e.to_string() }),
            )
        })?;

        let new_link = NewShortLink {
            id: Uuid::new_v4(),
            long_url: destination.to_string(),
            hash: String::new(),
            user_id: caller.map_or(self.default_owner, |claims| claims.sub),
        };

        let mut link = match custom_hash.filter(|h| !h.is_empty()) {
            Some(hash) => self.insert_custom(new_link, hash).await?,
            None => self.insert_generated(new_link).await?,
        };

        info!(link_id = %link.id, hash = %link.hash, owner = %link.user_id, "Link shortened");

        link.hash = short_url(public_base, &link.hash);
        Ok(link)
    }

    async fn insert_custom(
        &self,
        new_link: NewShortLink,
        hash: String,
    ) -> Result<ShortLink, AppError> {
        validate_custom_hash(&hash)?;

        match self.links.create(new_link.with_hash(hash.clone())).await {
            Err(AppError::Conflict { .. }) => Err(AppError::conflict(
                format!("Oops, '{hash}' already exists"),
                json!({ "hash": hash }),
            )),
            other => other,
        }
    }

    async fn insert_generated(&self, new_link: NewShortLink) -> Result<ShortLink, AppError> {
        for attempt in 1..=self.max_attempts {
            let hash = self
                .generator
                .generate(&new_link.id.to_string(), &new_link.long_url);

            match self.links.create(new_link.with_hash(hash)).await {
                Ok(link) => return Ok(link),
                Err(AppError::Conflict { .. }) => {
                    debug!(attempt, link_id = %new_link.id, "Generated hash collided, retrying");
                }
                Err(e) => return Err(e),
            }
        }

        error!(
            attempts = self.max_attempts,
            link_id = %new_link.id,
            "Exhausted hash generation attempts"
        );

        Err(AppError::internal(
            "Failed to generate unique hash",
            json!({ "attempts": self.max_attempts }),
        ))
    }

    /// Resolves a hash to its stored link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this hash.
    pub async fn redirect(&self, hash: &str) -> Result<ShortLink, AppError> {
        self.links
            .find_by_hash(hash)
            .await?
            .ok_or_else(|| AppError::not_found("Url not found", json!({ "hash": hash })))
    }

    /// Deletes a link owned by the caller; admins may delete any link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the link does not exist and
    /// [`AppError::Unauthorized`] if a non-admin caller does not own it.
    pub async fn delete(&self, caller: &Claims, id: Uuid) -> Result<ShortLink, AppError> {
        if !caller.is_admin() {
            let link = self.links.find_by_id(id).await?.ok_or_else(|| url_not_found(id))?;

            if link.user_id != caller.sub {
                warn!(link_id = %id, user_id = %caller.sub, "Refused to delete link owned by another user");
                return Err(AppError::unauthorized(
                    "Unauthorized to perform this action",
                    json!({ "reason": "not the owner" }),
                ));
            }
        }

        let link = self.links.delete(id).await?.ok_or_else(|| url_not_found(id))?;

        info!(link_id = %link.id, user_id = %caller.sub, "Link deleted");
        Ok(link)
    }

    /// Lists the caller's links.
    pub async fn list_mine(&self, caller: &Claims) -> Result<Vec<ShortLink>, AppError> {
        self.links.list_by_owner(caller.sub).await
    }

    /// Lists links owned by `user_id`.
    pub async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<ShortLink>, AppError> {
        self.links.list_by_owner(user_id).await
    }

    pub async fn list_all(&self) -> Result<Vec<ShortLink>, AppError> {
        self.links.list_all().await
    }
}

fn url_not_found(id: Uuid) -> AppError {
    AppError::not_found("Url not found", json!({ "id": id }))
}

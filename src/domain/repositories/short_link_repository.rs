//! Repository trait for short link data access.

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

/// Repository interface for managing short links.
///
/// The unique constraint on `hash` is the authority on collisions: `create`
/// must report a duplicate hash as [`AppError::Conflict`] so callers can
/// tell it apart from other storage failures.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgShortLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortLinkRepository: Send + Sync {
    /// Inserts a new short link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the hash already exists.
    /// Returns [`AppError::Internal`] on other database errors.
    async fn create(&self, new_link: NewShortLink) -> Result<ShortLink, AppError>;

    /// Finds a link by its short hash.
    async fn find_by_hash(&self, hash: &str) -> Result<Option<ShortLink>, AppError>;

    /// Finds a link by its id.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ShortLink>, AppError>;

    /// Lists links owned by `user_id`, newest first.
    async fn list_by_owner(&self, user_id: Uuid) -> Result<Vec<ShortLink>, AppError>;

    /// Lists every link, newest first.
    async fn list_all(&self) -> Result<Vec<ShortLink>, AppError>;

    /// Deletes a link and returns the removed row.
    ///
    /// Returns `Ok(None)` if no link has this id.
    async fn delete(&self, id: Uuid) -> Result<Option<ShortLink>, AppError>;
}

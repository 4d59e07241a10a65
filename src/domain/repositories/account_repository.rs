//! Repository trait for account data access.

use crate::domain::entities::{Account, AccountKey, NewAccount, ProfileUpdate};
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

/// Repository interface for managing accounts.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgAccountRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Creates a new account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the email (or id) is already taken.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_account: NewAccount) -> Result<Account, AppError>;

    /// Finds an account by id or email.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find(&self, key: &AccountKey) -> Result<Option<Account>, AppError>;

    /// Lists all accounts, newest first.
    async fn list(&self) -> Result<Vec<Account>, AppError>;

    /// Applies a profile update and bumps `updated_at`.
    ///
    /// Only the fields present in [`ProfileUpdate`] are written.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no account has this id.
    async fn update_profile(&self, id: Uuid, update: ProfileUpdate) -> Result<Account, AppError>;

    /// Replaces the password hash and salt.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no account has this id.
    async fn update_password(
        &self,
        id: Uuid,
        password_hash: &str,
        salt: &str,
    ) -> Result<Account, AppError>;

    /// Sets the locked flag.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Account))` with the updated row
    /// - `Ok(None)` if the account does not exist
    async fn set_locked(&self, key: &AccountKey, locked: bool)
    -> Result<Option<Account>, AppError>;
}

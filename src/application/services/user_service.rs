//! Account registration, authentication and administration.

use std::sync::Arc;

use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use super::auth_service::{AuthService, Claims};
use crate::domain::entities::{Account, AccountKey, NewAccount, ProfileUpdate, Role};
use crate::domain::repositories::AccountRepository;
use crate::error::AppError;
use crate::utils::password::{hash_password, verify_password};

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Input for creating a regular account.
#[derive(Debug, Clone)]
pub struct Registration {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub password: String,
}

/// The administrator account created at startup when missing.
#[derive(Debug, Clone)]
pub struct AdminBootstrap {
    pub id: Uuid,
    pub email: String,
    pub password: String,
}

/// A freshly issued token together with the (redacted) account it belongs to.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub account: Account,
}

/// Service for the user directory.
///
/// Every account returned from this service has its password hash and salt
/// cleared. Mutations other than unlocking are refused for locked accounts.
pub struct UserService {
    accounts: Arc<dyn AccountRepository>,
    auth: Arc<AuthService>,
}

impl UserService {
    pub fn new(accounts: Arc<dyn AccountRepository>, auth: Arc<AuthService>) -> Self {
        Self { accounts, auth }
    }

    /// Registers a regular account and signs it in.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the password is too short.
    /// Returns [`AppError::Conflict`] if the email is already registered.
    pub async fn register(&self, registration: Registration) -> Result<Session, AppError> {
        check_password_length(&registration.password)?;

        let account = self
            .create_account(
                Uuid::new_v4(),
                registration.firstname,
                registration.lastname,
                registration.email,
                &registration.password,
                Role::User,
            )
            .await?;

        info!(user_id = %account.id, "User registered");

        let token = self.auth.issue(&account)?;
        Ok(Session {
            token,
            account: account.redacted(),
        })
    }

    /// Creates the bootstrap administrator unless an account with its id exists.
    ///
    /// Returns `true` when the account was created.
    pub async fn ensure_admin(&self, admin: AdminBootstrap) -> Result<bool, AppError> {
        if let Some(existing) = self.accounts.find(&AccountKey::Id(admin.id)).await? {
            info!(user_id = %existing.id, email = %existing.email, "Admin account already exists");
            return Ok(false);
        }

        let account = self
            .create_admin(admin.id, admin.email, &admin.password)
            .await?;

        info!(user_id = %account.id, email = %account.email, "Admin account created");
        Ok(true)
    }

    /// Creates an administrator account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the id or email is already taken.
    pub async fn create_admin(
        &self,
        id: Uuid,
        email: String,
        password: &str,
    ) -> Result<Account, AppError> {
        check_password_length(password)?;

        let account = self
            .create_account(
                id,
                "Admin".to_string(),
                String::new(),
                email,
                password,
                Role::Admin,
            )
            .await?;

        Ok(account.redacted())
    }

    async fn create_account(
        &self,
        id: Uuid,
        firstname: String,
        lastname: String,
        email: String,
        password: &str,
        role: Role,
    ) -> Result<Account, AppError> {
        let hashed = hash_password(password)?;

        self.accounts
            .create(NewAccount {
                id,
                firstname,
                lastname,
                email: email.trim().to_lowercase(),
                password: hashed.hash,
                salt: hashed.salt,
                role,
            })
            .await
    }

    /// Verifies credentials and issues a token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] for an unknown email, a wrong
    /// password, or a locked account.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, AppError> {
        let key = AccountKey::Email(email.trim().to_lowercase());

        let Some(account) = self.accounts.find(&key).await? else {
            return Err(invalid_credentials());
        };

        if !verify_password(password, &account.salt, &account.password) {
            warn!(user_id = %account.id, "Login failed: wrong password");
            return Err(invalid_credentials());
        }

        if account.is_locked {
            return Err(account_locked(&account));
        }

        let token = self.auth.issue(&account)?;
        Ok(Session {
            token,
            account: account.redacted(),
        })
    }

    /// Returns the caller's own account.
    pub async fn me(&self, claims: &Claims) -> Result<Account, AppError> {
        self.fetch(&AccountKey::Id(claims.sub))
            .await
            .map(Account::redacted)
    }

    /// Returns an account by id or email.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if `id_or_email` matches no account or
    /// is neither an email nor a UUID.
    pub async fn get(&self, id_or_email: &str) -> Result<Account, AppError> {
        let key = parse_key(id_or_email)?;
        self.fetch(&key).await.map(Account::redacted)
    }

    pub async fn list(&self) -> Result<Vec<Account>, AppError> {
        let accounts = self.accounts.list().await?;
        Ok(accounts.into_iter().map(Account::redacted).collect())
    }

    /// Updates the caller's own profile.
    pub async fn update_me(
        &self,
        claims: &Claims,
        update: ProfileUpdate,
    ) -> Result<Account, AppError> {
        self.update_profile(&AccountKey::Id(claims.sub), update)
            .await
    }

    /// Updates any account's profile.
    pub async fn update(
        &self,
        id_or_email: &str,
        update: ProfileUpdate,
    ) -> Result<Account, AppError> {
        let key = parse_key(id_or_email)?;
        self.update_profile(&key, update).await
    }

    async fn update_profile(
        &self,
        key: &AccountKey,
        update: ProfileUpdate,
    ) -> Result<Account, AppError> {
        let account = self.fetch(key).await?;

        if account.is_locked {
            return Err(account_locked(&account));
        }

        if update.is_empty() {
            return Ok(account.redacted());
        }

        let updated = self.accounts.update_profile(account.id, update).await?;
        info!(user_id = %updated.id, "Profile updated");

        Ok(updated.redacted())
    }

    /// Replaces the caller's password, re-hashing with a fresh salt.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the password is too short and
    /// [`AppError::Unauthorized`] if the account is locked.
    pub async fn reset_password(
        &self,
        claims: &Claims,
        new_password: &str,
    ) -> Result<Account, AppError> {
        check_password_length(new_password)?;

        let account = self.fetch(&AccountKey::Id(claims.sub)).await?;

        if account.is_locked {
            return Err(account_locked(&account));
        }

        let hashed = hash_password(new_password)?;
        let updated = self
            .accounts
            .update_password(account.id, &hashed.hash, &hashed.salt)
            .await?;

        info!(user_id = %updated.id, "Password reset");
        Ok(updated.redacted())
    }

    /// Acknowledges a forgot-password request for a registered email.
    ///
    /// Delivering the reset link is not handled here.
    pub async fn forgot_password(&self, email: &str) -> Result<(), AppError> {
        let key = AccountKey::Email(email.trim().to_lowercase());

        match self.accounts.find(&key).await? {
            Some(account) => {
                info!(user_id = %account.id, "Forgot-password requested");
                Ok(())
            }
            None => Err(AppError::not_found(
                "User does not exist",
                json!({ "email": email }),
            )),
        }
    }

    /// Locks an unlocked account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the account is already locked.
    pub async fn lock(&self, id_or_email: &str) -> Result<Account, AppError> {
        let key = parse_key(id_or_email)?;
        let account = self.fetch(&key).await?;

        if account.is_locked {
            return Err(account_locked(&account));
        }

        let locked = self
            .accounts
            .set_locked(&AccountKey::Id(account.id), true)
            .await?
            .ok_or_else(|| user_not_found(&key))?;

        info!(user_id = %locked.id, "User locked");
        Ok(locked.redacted())
    }

    /// Unlocks an account. Unlocking an unlocked account is a no-op.
    pub async fn unlock(&self, id_or_email: &str) -> Result<Account, AppError> {
        let key = parse_key(id_or_email)?;

        let unlocked = self
            .accounts
            .set_locked(&key, false)
            .await?
            .ok_or_else(|| user_not_found(&key))?;

        info!(user_id = %unlocked.id, "User unlocked");
        Ok(unlocked.redacted())
    }

    async fn fetch(&self, key: &AccountKey) -> Result<Account, AppError> {
        self.accounts
            .find(key)
            .await?
            .ok_or_else(|| user_not_found(key))
    }
}

fn parse_key(id_or_email: &str) -> Result<AccountKey, AppError> {
    AccountKey::parse(id_or_email).ok_or_else(|| {
        AppError::not_found("User not found", json!({ "id_or_email": id_or_email }))
    })
}

fn check_password_length(password: &str) -> Result<(), AppError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AppError::bad_request(
            "Password is too short",
            json!({ "min_length": MIN_PASSWORD_LENGTH }),
        ));
    }
    Ok(())
}

fn user_not_found(key: &AccountKey) -> AppError {
    AppError::not_found("User not found", json!({ "id_or_email": key.to_string() }))
}

fn invalid_credentials() -> AppError {
    AppError::unauthorized("Invalid credentials", json!({ "reason": "invalid credentials" }))
}

fn account_locked(account: &Account) -> AppError {
    AppError::unauthorized(
        "User is currently locked",
        json!({ "reason": "account locked", "id": account.id }),
    )
}

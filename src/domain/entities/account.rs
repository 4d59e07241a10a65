//! Account entity representing a registered user.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::role::Role;

/// A registered account.
///
/// `password` holds the argon2 PHC string and `salt` the per-account salt it
/// was derived with. Both are cleared by [`Account::redacted`] before an
/// account leaves the service layer.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: Uuid,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub password: String,
    pub salt: String,
    pub role: Role,
    pub is_locked: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Returns a copy with the password hash and salt emptied.
    pub fn redacted(mut self) -> Self {
        self.password.clear();
        self.salt.clear();
        self
    }
}

/// Input data for creating an account.
///
/// `password` and `salt` must already be hashed/generated.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub id: Uuid,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub password: String,
    pub salt: String,
    pub role: Role,
}

/// Profile fields that may change through the general update path.
///
/// Email, password, salt, role and the lock flag have dedicated operations
/// and are deliberately absent here. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.firstname.is_none() && self.lastname.is_none()
    }
}

/// Lookup key for admin endpoints that accept either an id or an email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountKey {
    Id(Uuid),
    Email(String),
}

impl AccountKey {
    /// Interprets `value` as an email when it contains `@`, otherwise as an id.
    ///
    /// Emails are trimmed and lowercased, matching how they are stored.
    /// Returns `None` when the value is neither an email nor a valid UUID.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.contains('@') {
            Some(AccountKey::Email(value.to_lowercase()))
        } else {
            Uuid::parse_str(value).ok().map(AccountKey::Id)
        }
    }
}

impl std::fmt::Display for AccountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountKey::Id(id) => write!(f, "{id}"),
            AccountKey::Email(email) => f.write_str(email),
        }
    }
}

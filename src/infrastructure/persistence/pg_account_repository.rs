//! PostgreSQL implementation of the account repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use super::{insert_with_timeout, with_timeout};
use crate::domain::entities::{Account, AccountKey, NewAccount, ProfileUpdate, Role};
use crate::domain::repositories::AccountRepository;
use crate::error::AppError;

const ACCOUNT_COLUMNS: &str =
    "id, firstname, lastname, email, password, salt, role, is_locked, created_at, updated_at";

#[derive(FromRow)]
struct AccountRow {
    id: Uuid,
    firstname: String,
    lastname: String,
    email: String,
    password: String,
    salt: String,
    role: i16,
    is_locked: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = AppError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let role = Role::from_i16(row.role).ok_or_else(|| {
            AppError::internal(
                "Unknown role stored for account",
                json!({ "id": row.id, "role": row.role }),
            )
        })?;

        Ok(Account {
            id: row.id,
            firstname: row.firstname,
            lastname: row.lastname,
            email: row.email,
            password: row.password,
            salt: row.salt,
            role,
            is_locked: row.is_locked,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// PostgreSQL repository for accounts.
pub struct PgAccountRepository {
    pool: Arc<PgPool>,
    query_timeout: Duration,
}

impl PgAccountRepository {
    pub fn new(pool: Arc<PgPool>, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }
}

#[async_trait]
impl AccountRepository for PgAccountRepository {
    async fn create(&self, new_account: NewAccount) -> Result<Account, AppError> {
        let sql = format!(
            "INSERT INTO users (id, firstname, lastname, email, password, salt, role)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {ACCOUNT_COLUMNS}"
        );

        let query = sqlx::query_as::<_, AccountRow>(&sql)
            .bind(new_account.id)
            .bind(&new_account.firstname)
            .bind(&new_account.lastname)
            .bind(&new_account.email)
            .bind(&new_account.password)
            .bind(&new_account.salt)
            .bind(new_account.role.as_i16())
            .fetch_one(self.pool.as_ref());

        let row = insert_with_timeout(self.query_timeout, query, |constraint| {
            AppError::conflict(
                "Account already exists",
                json!({ "email": new_account.email, "constraint": constraint }),
            )
        })
        .await?;

        row.try_into()
    }

    async fn find(&self, key: &AccountKey) -> Result<Option<Account>, AppError> {
        let row = match key {
            AccountKey::Id(id) => {
                let sql = format!("SELECT {ACCOUNT_COLUMNS} FROM users WHERE id = $1");
                with_timeout(
                    self.query_timeout,
                    sqlx::query_as::<_, AccountRow>(&sql)
                        .bind(id)
                        .fetch_optional(self.pool.as_ref()),
                )
                .await?
            }
            AccountKey::Email(email) => {
                let sql = format!("SELECT {ACCOUNT_COLUMNS} FROM users WHERE email = $1");
                with_timeout(
                    self.query_timeout,
                    sqlx::query_as::<_, AccountRow>(&sql)
                        .bind(email)
                        .fetch_optional(self.pool.as_ref()),
                )
                .await?
            }
        };

        row.map(Account::try_from).transpose()
    }

    async fn list(&self) -> Result<Vec<Account>, AppError> {
        let sql = format!("SELECT {ACCOUNT_COLUMNS} FROM users ORDER BY created_at DESC");

        let rows = with_timeout(
            self.query_timeout,
            sqlx::query_as::<_, AccountRow>(&sql).fetch_all(self.pool.as_ref()),
        )
        .await?;

        rows.into_iter().map(Account::try_from).collect()
    }

    async fn update_profile(&self, id: Uuid, update: ProfileUpdate) -> Result<Account, AppError> {
        let sql = format!(
            "UPDATE users
             SET firstname = COALESCE($2, firstname),
                 lastname = COALESCE($3, lastname),
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {ACCOUNT_COLUMNS}"
        );

        let row = with_timeout(
            self.query_timeout,
            sqlx::query_as::<_, AccountRow>(&sql)
                .bind(id)
                .bind(update.firstname)
                .bind(update.lastname)
                .fetch_optional(self.pool.as_ref()),
        )
        .await?
        .ok_or_else(|| AppError::not_found("User not found", json!({ "id": id })))?;

        row.try_into()
    }

    async fn update_password(
        &self,
        id: Uuid,
        password_hash: &str,
        salt: &str,
    ) -> Result<Account, AppError> {
        let sql = format!(
            "UPDATE users
             SET password = $2, salt = $3, updated_at = NOW()
             WHERE id = $1
             RETURNING {ACCOUNT_COLUMNS}"
        );

        let row = with_timeout(
            self.query_timeout,
            sqlx::query_as::<_, AccountRow>(&sql)
                .bind(id)
                .bind(password_hash)
                .bind(salt)
                .fetch_optional(self.pool.as_ref()),
        )
        .await?
        .ok_or_else(|| AppError::not_found("User not found", json!({ "id": id })))?;

        row.try_into()
    }

    async fn set_locked(
        &self,
        key: &AccountKey,
        locked: bool,
    ) -> Result<Option<Account>, AppError> {
        let (filter, value) = match key {
            AccountKey::Id(id) => ("id = $2::uuid", id.to_string()),
            AccountKey::Email(email) => ("email = $2", email.clone()),
        };

        let sql = format!(
            "UPDATE users
             SET is_locked = $1, updated_at = NOW()
             WHERE {filter}
             RETURNING {ACCOUNT_COLUMNS}"
        );

        let row = with_timeout(
            self.query_timeout,
            sqlx::query_as::<_, AccountRow>(&sql)
                .bind(locked)
                .bind(value)
                .fetch_optional(self.pool.as_ref()),
        )
        .await?;

        row.map(Account::try_from).transpose()
    }
}

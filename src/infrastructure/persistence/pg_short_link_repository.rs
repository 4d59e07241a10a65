//! PostgreSQL implementation of the short link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use super::{insert_with_timeout, with_timeout};
use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::ShortLinkRepository;
use crate::error::AppError;

#[derive(FromRow)]
struct ShortLinkRow {
    id: Uuid,
    long_url: String,
    hash: String,
    user_id: Uuid,
    created_at: DateTime<Utc>,
}

impl From<ShortLinkRow> for ShortLink {
    fn from(row: ShortLinkRow) -> Self {
        ShortLink {
            id: row.id,
            long_url: row.long_url,
            hash: row.hash,
            user_id: row.user_id,
            created_at: row.created_at,
        }
    }
}

/// PostgreSQL repository for short links.
///
/// Relies on the `short_links_hash_key` unique constraint to reject
/// duplicate hashes; those surface as [`AppError::Conflict`].
pub struct PgShortLinkRepository {
    pool: Arc<PgPool>,
    query_timeout: Duration,
}

impl PgShortLinkRepository {
    pub fn new(pool: Arc<PgPool>, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }
}

#[async_trait]
impl ShortLinkRepository for PgShortLinkRepository {
    async fn create(&self, new_link: NewShortLink) -> Result<ShortLink, AppError> {
        let query = sqlx::query_as::<_, ShortLinkRow>(
            r#"
            INSERT INTO short_links (id, long_url, hash, user_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, long_url, hash, user_id, created_at
            "#,
        )
        .bind(new_link.id)
        .bind(&new_link.long_url)
        .bind(&new_link.hash)
        .bind(new_link.user_id)
        .fetch_one(self.pool.as_ref());

        let row = insert_with_timeout(self.query_timeout, query, |constraint| {
            AppError::conflict(
                "Hash already exists",
                json!({ "hash": new_link.hash, "constraint": constraint }),
            )
        })
        .await?;

        Ok(row.into())
    }

    async fn find_by_hash(&self, hash: &str) -> Result<Option<ShortLink>, AppError> {
        let row = with_timeout(
            self.query_timeout,
            sqlx::query_as::<_, ShortLinkRow>(
                r#"
                SELECT id, long_url, hash, user_id, created_at
                FROM short_links
                WHERE hash = $1
                "#,
            )
            .bind(hash)
            .fetch_optional(self.pool.as_ref()),
        )
        .await?;

        Ok(row.map(Into::into))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ShortLink>, AppError> {
        let row = with_timeout(
            self.query_timeout,
            sqlx::query_as::<_, ShortLinkRow>(
                r#"
                SELECT id, long_url, hash, user_id, created_at
                FROM short_links
                WHERE id = $1
                "#,
            )
            .bind(id)
            .fetch_optional(self.pool.as_ref()),
        )
        .await?;

        Ok(row.map(Into::into))
    }

    async fn list_by_owner(&self, user_id: Uuid) -> Result<Vec<ShortLink>, AppError> {
        let rows = with_timeout(
            self.query_timeout,
            sqlx::query_as::<_, ShortLinkRow>(
                r#"
                SELECT id, long_url, hash, user_id, created_at
                FROM short_links
                WHERE user_id = $1
                ORDER BY created_at DESC
                "#,
            )
            .bind(user_id)
            .fetch_all(self.pool.as_ref()),
        )
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_all(&self) -> Result<Vec<ShortLink>, AppError> {
        let rows = with_timeout(
            self.query_timeout,
            sqlx::query_as::<_, ShortLinkRow>(
                r#"
                SELECT id, long_url, hash, user_id, created_at
                FROM short_links
                ORDER BY created_at DESC
                "#,
            )
            .fetch_all(self.pool.as_ref()),
        )
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn delete(&self, id: Uuid) -> Result<Option<ShortLink>, AppError> {
        let row = with_timeout(
            self.query_timeout,
            sqlx::query_as::<_, ShortLinkRow>(
                r#"
                DELETE FROM short_links
                WHERE id = $1
                RETURNING id, long_url, hash, user_id, created_at
                "#,
            )
            .bind(id)
            .fetch_optional(self.pool.as_ref()),
        )
        .await?;

        Ok(row.map(Into::into))
    }
}

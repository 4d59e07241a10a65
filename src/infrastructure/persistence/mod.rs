//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx with
//! runtime-checked queries mapped through `FromRow` row structs.
//!
//! # Repositories
//!
//! - [`PgAccountRepository`] - Account storage, lookup and lock management
//! - [`PgShortLinkRepository`] - Short link storage and retrieval
//!
//! Every query runs under the configured query timeout; a query that
//! overruns it fails with [`AppError::Internal`] and is not retried.

pub mod pg_account_repository;
pub mod pg_short_link_repository;

pub use pg_account_repository::PgAccountRepository;
pub use pg_short_link_repository::PgShortLinkRepository;

use std::future::Future;
use std::time::Duration;

use serde_json::json;

use crate::error::AppError;

/// Runs a database future with an upper bound on its duration.
pub(crate) async fn with_timeout<T, F>(limit: Duration, query: F) -> Result<T, AppError>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    bounded(limit, query, AppError::from).await
}

/// Runs an insert under the query timeout, reporting a unique violation
/// through `on_conflict` with the violated constraint name.
pub(crate) async fn insert_with_timeout<T, F, C>(
    limit: Duration,
    query: F,
    on_conflict: C,
) -> Result<T, AppError>
where
    F: Future<Output = Result<T, sqlx::Error>>,
    C: FnOnce(String) -> AppError,
{
    bounded(limit, query, |e| match unique_violation(&e) {
        Some(constraint) => on_conflict(constraint),
        None => e.into(),
    })
    .await
}

async fn bounded<T, F, M>(limit: Duration, query: F, map_err: M) -> Result<T, AppError>
where
    F: Future<Output = Result<T, sqlx::Error>>,
    M: FnOnce(sqlx::Error) -> AppError,
{
    match tokio::time::timeout(limit, query).await {
        Ok(result) => result.map_err(map_err),
        Err(_) => {
            tracing::warn!(timeout_ms = limit.as_millis() as u64, "Database query timed out");
            Err(AppError::internal(
                "Database query timed out",
                json!({ "timeout_ms": limit.as_millis() as u64 }),
            ))
        }
    }
}

/// Returns the violated unique constraint name, if `err` is a unique violation.
fn unique_violation(err: &sqlx::Error) -> Option<String> {
    err.as_database_error()
        .filter(|db| db.is_unique_violation())
        .map(|db| db.constraint().unwrap_or_default().to_string())
}

//! Counter store trait and error types.

use async_trait::async_trait;

/// Errors that can occur while loading or saving the counter.
#[derive(Debug, thiserror::Error)]
pub enum CounterStoreError {
    #[error("Counter store connection error: {0}")]
    Connection(String),
    #[error("Counter store operation error: {0}")]
    Operation(String),
    #[error("Stored counter is not a number: {0}")]
    Corrupt(String),
}

pub type CounterStoreResult<T> = Result<T, CounterStoreError>;

/// Durable home for the hash generator counter.
///
/// The counter is read once at startup and written once after the server
/// has drained, so implementations favour simplicity over throughput.
///
/// # Implementations
///
/// - [`crate::infrastructure::counter::RedisCounterStore`] - Redis `GET`/`SET` on a single key
/// - [`crate::infrastructure::counter::NullCounterStore`] - Always starts from zero
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Returns the last saved counter value, or `None` if nothing was saved yet.
    async fn load(&self) -> CounterStoreResult<Option<u64>>;

    /// Persists `value` as the counter to resume from.
    async fn save(&self, value: u64) -> CounterStoreResult<()>;

    /// Name used in startup logs.
    fn backend(&self) -> &'static str;
}

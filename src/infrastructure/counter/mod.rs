//! Persistence for the short hash generator's counter.
//!
//! Provides a [`CounterStore`] trait with two implementations:
//! - [`RedisCounterStore`] - Keeps the counter in Redis across restarts
//! - [`NullCounterStore`] - No-op implementation when Redis is not configured

mod null_store;
mod redis_store;
mod store;

pub use null_store::NullCounterStore;
pub use redis_store::RedisCounterStore;
pub use store::{CounterStore, CounterStoreError, CounterStoreResult};

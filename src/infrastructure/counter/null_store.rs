//! No-op counter store.

use super::store::{CounterStore, CounterStoreResult};
use async_trait::async_trait;
use tracing::debug;

/// Counter store that remembers nothing.
///
/// Used when `REDIS_URL` is not configured: the counter restarts from zero
/// and collisions with earlier hashes are resolved by the retry loop.
pub struct NullCounterStore;

impl NullCounterStore {
    pub fn new() -> Self {
        debug!("Using NullCounterStore (counter is not persisted)");
        Self
    }
}

impl Default for NullCounterStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CounterStore for NullCounterStore {
    async fn load(&self) -> CounterStoreResult<Option<u64>> {
        Ok(None)
    }

    async fn save(&self, _value: u64) -> CounterStoreResult<()> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "none"
    }
}

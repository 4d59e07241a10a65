//! Redis-backed counter store.

use super::store::{CounterStore, CounterStoreError, CounterStoreResult};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, info};

/// Redis key holding the counter.
pub const COUNTER_KEY: &str = "counter";

/// Counter store that keeps a decimal value under [`COUNTER_KEY`].
pub struct RedisCounterStore {
    conn: ConnectionManager,
    key: String,
}

impl RedisCounterStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`CounterStoreError::Connection`] if the URL is invalid, the
    /// connection cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str) -> CounterStoreResult<Self> {
        let client = Client::open(redis_url).map_err(|e| {
            CounterStoreError::Connection(format!("Failed to create Redis client: {e}"))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            CounterStoreError::Connection(format!("Failed to connect to Redis: {e}"))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CounterStoreError::Connection(format!("Redis PING failed: {e}")))?;

        info!("Connected to Redis counter store");

        Ok(Self {
            conn: manager,
            key: COUNTER_KEY.to_string(),
        })
    }
}

#[async_trait]
impl CounterStore for RedisCounterStore {
    async fn load(&self) -> CounterStoreResult<Option<u64>> {
        let mut conn = self.conn.clone();

        let raw: Option<String> = conn
            .get(&self.key)
            .await
            .map_err(|e| CounterStoreError::Operation(e.to_string()))?;

        match raw {
            Some(value) => {
                let counter = value
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| CounterStoreError::Corrupt(value.clone()))?;
                debug!(counter, "Loaded counter from Redis");
                Ok(Some(counter))
            }
            None => Ok(None),
        }
    }

    async fn save(&self, value: u64) -> CounterStoreResult<()> {
        let mut conn = self.conn.clone();

        conn.set::<_, _, ()>(&self.key, value.to_string())
            .await
            .map_err(|e| CounterStoreError::Operation(e.to_string()))?;

        debug!(counter = value, "Saved counter to Redis");
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}

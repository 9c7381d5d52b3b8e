//! Redis-backed cache store.
//!
//! Implements the byte-oriented [`CacheStore`] trait from
//! `stakelens-core` over a multiplexed Redis connection. Entries are
//! written with a per-key TTL (`SET .. EX`); the envelope layer above
//! enforces its own expiry independently, so a Redis TTL that outlives
//! the envelope is harmless.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;

use stakelens_core::cache::{CacheError, CacheStore};

/// Cache store over a shared, reconnecting Redis connection.
///
/// `ConnectionManager` re-establishes the connection on its own;
/// individual command failures surface as [`CacheError`] and are
/// absorbed by the orchestration layer as misses.
#[derive(Clone)]
pub struct RedisCacheStore {
    connection: ConnectionManager,
}

impl RedisCacheStore {
    /// Connects to Redis and returns a ready store.
    ///
    /// Fails when the initial connection cannot be established; the
    /// caller decides whether to fall back to another store.
    pub async fn connect(url: &str) -> Result<Self, CacheError> {
        let client =
            redis::Client::open(url).map_err(|e| CacheError::Unavailable(e.to_string()))?;
        let connection = ConnectionManager::new(client)
            .await
            .map_err(|e| CacheError::Unavailable(e.to_string()))?;
        debug!("Connected to Redis");
        Ok(Self { connection })
    }
}

#[async_trait]
impl CacheStore for RedisCacheStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let mut connection = self.connection.clone();
        connection
            .get(key)
            .await
            .map_err(|e: redis::RedisError| CacheError::ReadFailed(e.to_string()))
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), CacheError> {
        let mut connection = self.connection.clone();
        // EX 0 is invalid; sub-second TTLs round up to one second.
        let seconds = ttl.as_secs().max(1);
        connection
            .set_ex(key, value, seconds)
            .await
            .map_err(|e: redis::RedisError| CacheError::WriteFailed(e.to_string()))
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        let mut connection = self.connection.clone();
        connection
            .del(key)
            .await
            .map_err(|e: redis::RedisError| CacheError::WriteFailed(e.to_string()))
    }
}

//! Byte-oriented cache store trait and the in-memory implementation.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;
use thiserror::Error;

/// Errors surfaced by cache backends.
#[derive(Error, Debug)]
pub enum CacheError {
    /// A read against the backend failed.
    #[error("Cache read failed: {0}")]
    ReadFailed(String),

    /// A write or delete against the backend failed.
    #[error("Cache write failed: {0}")]
    WriteFailed(String),

    /// The backend could not be reached at all.
    #[error("Cache unavailable: {0}")]
    Unavailable(String),
}

/// Key/value store with per-entry expiration.
///
/// Values are opaque bytes (serialized envelopes). Implementations must
/// tolerate concurrent access and may expire entries on their own
/// schedule; the envelope layer enforces expiry independently.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Read an entry. `Ok(None)` covers both missing and expired keys.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Write an entry with a time-to-live.
    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), CacheError>;

    /// Remove an entry. Removing a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<(), CacheError>;
}

struct StoredEntry {
    value: Vec<u8>,
    deadline: Instant,
}

/// Process-local cache store.
///
/// Expiry is lazy: an expired entry is evicted the next time its key is
/// read. Used in tests and as the runtime fallback when Redis is
/// unreachable at startup.
#[derive(Default)]
pub struct MemoryCacheStore {
    entries: DashMap<String, StoredEntry>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        if let Some(entry) = self.entries.get(key) {
            if Instant::now() > entry.deadline {
                drop(entry);
                self.entries.remove(key);
                return Ok(None);
            }
            return Ok(Some(entry.value.clone()));
        }
        Ok(None)
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), CacheError> {
        let deadline = Instant::now() + ttl;
        self.entries.insert(key.to_string(), StoredEntry { value, deadline });
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.entries.remove(key);
        Ok(())
    }
}

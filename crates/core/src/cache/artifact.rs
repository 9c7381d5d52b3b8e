//! Cache envelope and the typed artifact handle.

use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::store::CacheStore;
use crate::errors::Result;

/// A cached payload with its creation and expiry timestamps.
///
/// The expiry inside the envelope is authoritative: even when a backend
/// enforces its own TTL, a deserialized envelope past `expires_at` is
/// treated as absent and deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEnvelope<T> {
    pub payload: T,
    pub cached_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Borrowed envelope for writes, serializing to the same shape as
/// [`CacheEnvelope`] without cloning the payload.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EnvelopeRef<'a, T> {
    payload: &'a T,
    cached_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

/// Typed read/write handle for one artifact family in the cache.
///
/// Parameterized by key prefix and TTL so price history, TVL, and
/// valuation share a single code path for envelope handling.
pub struct CachedArtifact<T> {
    store: Arc<dyn CacheStore>,
    prefix: &'static str,
    ttl: Duration,
    _marker: PhantomData<fn() -> T>,
}

impl<T> CachedArtifact<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(store: Arc<dyn CacheStore>, prefix: &'static str, ttl: Duration) -> Self {
        Self {
            store,
            prefix,
            ttl,
            _marker: PhantomData,
        }
    }

    /// Cache key for a symbol, e.g. `valuation:wstETH`.
    pub fn key(&self, symbol: &str) -> String {
        format!("{}:{}", self.prefix, symbol)
    }

    /// Read the artifact for a symbol.
    ///
    /// Every failure mode collapses to `None`: backend errors and
    /// malformed envelopes count as misses, and an expired envelope is
    /// deleted on the way out.
    pub async fn get(&self, symbol: &str) -> Option<T> {
        let key = self.key(symbol);
        let bytes = match self.store.get(&key).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(e) => {
                warn!("Cache read failed for {}: {}", key, e);
                return None;
            }
        };

        let envelope: CacheEnvelope<T> = match serde_json::from_slice(&bytes) {
            Ok(envelope) => envelope,
            Err(e) => {
                warn!("Discarding malformed cache entry {}: {}", key, e);
                return None;
            }
        };

        if Utc::now() > envelope.expires_at {
            debug!("Cache entry {} expired, evicting", key);
            if let Err(e) = self.store.delete(&key).await {
                warn!("Failed to evict expired cache entry {}: {}", key, e);
            }
            return None;
        }

        Some(envelope.payload)
    }

    /// Write the artifact for a symbol, best-effort.
    ///
    /// By the time this runs a correct result already exists and must
    /// still reach the caller, so failures only log.
    pub async fn put(&self, symbol: &str, payload: &T) {
        let key = self.key(symbol);
        let now = Utc::now();
        let expires_at =
            now + chrono::Duration::from_std(self.ttl).unwrap_or(chrono::Duration::MAX);
        let envelope = EnvelopeRef {
            payload,
            cached_at: now,
            expires_at,
        };

        let bytes = match serde_json::to_vec(&envelope) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Failed to serialize cache entry {}: {}", key, e);
                return;
            }
        };

        if let Err(e) = self.store.set(&key, bytes, self.ttl).await {
            warn!("Cache write failed for {}: {}", key, e);
        } else {
            debug!("Cached {} (ttl {:?})", key, self.ttl);
        }
    }

    /// Remove the artifact for a symbol, best-effort.
    pub async fn invalidate(&self, symbol: &str) {
        let key = self.key(symbol);
        if let Err(e) = self.store.delete(&key).await {
            warn!("Failed to invalidate cache entry {}: {}", key, e);
        }
    }

    /// Return the cached artifact, or fetch a fresh one, store it
    /// best-effort, and return it. Fetch errors propagate untouched and
    /// nothing partial is ever written.
    pub async fn get_or_fetch<F, Fut>(&self, symbol: &str, fetch: F) -> Result<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if let Some(hit) = self.get(symbol).await {
            debug!("Cache hit for {}", self.key(symbol));
            return Ok(hit);
        }

        let fresh = fetch().await?;
        self.put(symbol, &fresh).await;
        Ok(fresh)
    }
}

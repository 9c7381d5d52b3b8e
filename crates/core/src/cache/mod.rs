//! Timed cache layer.
//!
//! Every cached artifact (price history, TVL snapshot, valuation) is
//! wrapped in a [`CacheEnvelope`] carrying its own expiry and travels
//! through a byte-oriented [`CacheStore`] backend. The typed
//! [`CachedArtifact`] handle owns all envelope handling so the three
//! artifact families share one code path.
//!
//! Failure policy: a failing cache is indistinguishable from an empty
//! one. Reads that error, decode badly, or surface an expired envelope
//! collapse to a miss; writes are best-effort.

pub mod artifact;
pub mod store;

pub use artifact::{CacheEnvelope, CachedArtifact};
pub use store::{CacheError, CacheStore, MemoryCacheStore};

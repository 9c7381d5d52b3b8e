//! Valuation module.
//!
//! This module computes the valuation signals for liquid staking tokens:
//!
//! - [`model`] - Valuation result, TVL snapshot, and remarks types
//! - [`engine`] - Pure computations (APR, stability, classification)
//! - [`service`] - Cached orchestration over price and supply sources
//! - [`errors`] - Engine error types
//!
//! # Architecture
//!
//! ```text
//! ValuationService ──> CachedArtifact (price_history / tvl / valuation)
//!        │                         │
//!        │                         └──> CacheStore backend
//!        │
//!        ├──> PriceHistoryProvider (market-data crate)
//!        ├──> SupplySource         (market-data crate)
//!        └──> engine (pure, no I/O)
//! ```
//!
//! The engine never performs I/O and the service never does arithmetic;
//! the split keeps the numeric behavior testable without mocks.

pub mod engine;
pub mod errors;
pub mod model;
pub mod service;

#[cfg(test)]
mod service_tests;

// Re-export commonly used types for convenience
pub use errors::ValuationError;
pub use model::{TvlSnapshot, ValuationRemarks, ValuationResult};
pub use service::{ValuationCacheTtls, ValuationService, ValuationServiceTrait};

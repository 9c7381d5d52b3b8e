//! Stakelens Core - Domain entities, services, and traits.
//!
//! This crate contains the valuation business logic for Stakelens. It is
//! transport- and backend-agnostic: persistence and caching are reached
//! through the traits defined here ([`tokens::TokenStore`],
//! [`cache::CacheStore`]) and external market data through the traits of
//! the `stakelens-market-data` crate.
//!
//! # Architecture
//!
//! ```text
//!            HTTP layer (apps/server)
//!                      │
//!        ┌─────────────┴─────────────┐
//!        ▼                           ▼
//!   TokenService              ValuationService
//!        │                      │    │     │
//!        ▼                      │    │     └──> SupplySource (market-data)
//!   TokenStore ─> SQLite       │    └────────> PriceHistoryProvider
//!                               ▼
//!                        CachedArtifact ─> CacheStore ─> Redis / memory
//!                               │
//!                               ▼
//!                        valuation::engine (pure)
//! ```

pub mod cache;
pub mod constants;
pub mod errors;
pub mod tokens;
pub mod valuation;

// Re-export commonly used types for convenience
pub use tokens::Token;
pub use valuation::{ValuationRemarks, ValuationResult};

// Re-export error types
pub use errors::{DatabaseError, Error, Result};

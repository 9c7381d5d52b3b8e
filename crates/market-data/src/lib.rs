//! Stakelens Market Data Crate
//!
//! External data sources for the valuation service: historical token
//! prices (CoinGecko) and on-chain token supply (EVM JSON-RPC).
//!
//! # Architecture
//!
//! ```text
//! +----------------+       +----------------------+
//! |  Domain layer  | ----> | PriceHistoryProvider |   trait
//! +----------------+       +----------------------+
//!         |                           |
//!         |                           v
//!         |                +----------------------+
//!         |                |  CoinGeckoProvider   |
//!         |                +----------------------+
//!         |
//!         |                +----------------------+
//!         +--------------> |     SupplySource     |   trait
//!                          +----------------------+
//!                                      |
//!                                      v
//!                          +----------------------+
//!                          |   EvmSupplyClient    |
//!                          +----------------------+
//! ```
//!
//! Both traits are implemented here and consumed through `Arc<dyn ...>`
//! by the domain layer, which owns caching and failure policy. This
//! crate performs single round trips and reports what happened.

pub mod errors;
pub mod models;
pub mod provider;
pub mod supply;

// Re-export commonly used types for convenience
pub use errors::MarketDataError;
pub use models::PricePoint;
pub use provider::{CoinGeckoProvider, PriceHistoryProvider};
pub use supply::{EvmSupplyClient, SupplySource};

//! Token metadata module.
//!
//! The token universe is reference data: a fixed set of liquid staking
//! tokens seeded by migrations, with symbol, contract address, and
//! decimals. Everything here is read-only lookup.

pub mod errors;
pub mod model;
pub mod service;
pub mod store;

// Re-export commonly used types for convenience
pub use errors::TokenError;
pub use model::Token;
pub use service::{TokenService, TokenServiceTrait};
pub use store::TokenStore;

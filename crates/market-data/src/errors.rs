//! Error types for market data operations.
//!
//! Classifies failures from external sources so the domain layer can
//! decide what to propagate and what to degrade around.

use thiserror::Error;

/// Errors that can occur while fetching external market data.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The symbol has no mapping for the source. Retrying cannot help;
    /// the universe of supported symbols is fixed per provider.
    #[error("Symbol not supported: {0}")]
    SymbolNotSupported(String),

    /// The request to the source timed out.
    #[error("Request to {provider} timed out")]
    Timeout {
        /// Which source timed out.
        provider: String,
    },

    /// The source rejected the request for exceeding its rate limits.
    #[error("Rate limited by {provider}")]
    RateLimited {
        /// Which source applied the limit.
        provider: String,
    },

    /// The source answered with a non-success status or an API-level
    /// error payload.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// Which source failed.
        provider: String,
        /// Status line or error body detail.
        message: String,
    },

    /// The source answered 200 but the body could not be interpreted.
    #[error("Invalid response from {provider}: {message}")]
    InvalidResponse {
        /// Which source produced the body.
        provider: String,
        /// What went wrong while decoding it.
        message: String,
    },

    /// An on-chain contract read failed or returned unusable data.
    #[error("Contract call failed: {0}")]
    ContractCall(String),

    /// A transport-level error occurred before any response arrived.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl MarketDataError {
    /// True when retrying the same request cannot succeed.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::SymbolNotSupported(_))
    }
}

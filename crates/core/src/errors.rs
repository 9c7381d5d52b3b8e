//! Core error types for the Stakelens application.
//!
//! This module defines backend-agnostic error types. Storage-specific
//! errors (from Diesel, r2d2, etc.) are converted into these types by the
//! storage crate so that nothing above it depends on a database driver.

use thiserror::Error;

use crate::cache::CacheError;
use crate::tokens::TokenError;
use crate::valuation::ValuationError;
use stakelens_market_data::MarketDataError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the valuation service.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation errors.
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Token lookup errors.
    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    /// Valuation computation errors.
    #[error("Valuation error: {0}")]
    Valuation(#[from] ValuationError),

    /// External market data errors.
    #[error("Market data error: {0}")]
    MarketData(#[from] MarketDataError),

    /// Cache backend errors. These rarely propagate: the orchestration
    /// layer absorbs them and treats the cache as empty.
    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    /// Catch-all for unexpected errors.
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Database-agnostic error type for storage operations.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to establish a database connection.
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Failed to create or configure the connection pool.
    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(String),

    /// A database query failed to execute.
    #[error("Database query failed: {0}")]
    QueryFailed(String),

    /// The requested record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// A unique constraint was violated.
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// Database migration failed.
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl Error {
    /// True when the error denotes a missing token or record rather than
    /// an upstream or internal failure.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::Token(TokenError::NotFound(_)) | Error::Database(DatabaseError::NotFound(_))
        )
    }
}

// === From implementations for common error types ===

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Unexpected(format!("Serialization error: {}", err))
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}

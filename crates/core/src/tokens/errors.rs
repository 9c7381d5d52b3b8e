//! Token domain errors.

use thiserror::Error;

/// Errors from token lookups.
#[derive(Error, Debug)]
pub enum TokenError {
    /// The symbol is unknown or the token is inactive. Maps to a client
    /// error at the API boundary.
    #[error("Token not found or not supported: {0}")]
    NotFound(String),
}

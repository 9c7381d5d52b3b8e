//! Storage trait for token metadata.

use async_trait::async_trait;

use super::model::Token;
use crate::errors::Result;

/// Persistence seam for the token universe.
///
/// Implemented by the SQLite repository. Inactive tokens are invisible
/// through this trait; deactivation is how a token leaves the service
/// without losing its row.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// List active tokens ordered by symbol.
    async fn list_active(&self) -> Result<Vec<Token>>;

    /// Look up an active token by its exact symbol.
    async fn get_by_symbol(&self, symbol: &str) -> Result<Option<Token>>;
}

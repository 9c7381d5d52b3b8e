//! Provider trait definition.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::PricePoint;

/// Trait for sources of historical token prices.
///
/// Implementations fetch a trailing daily series for one symbol in a
/// single round trip. No caching and no retries happen at this level.
#[async_trait]
pub trait PriceHistoryProvider: Send + Sync {
    /// Identifier used in logs and error context.
    fn id(&self) -> &'static str;

    /// Fetch the trailing daily price series for a symbol.
    ///
    /// Returned points are unordered; an unknown symbol fails with
    /// [`MarketDataError::SymbolNotSupported`] before any network call.
    async fn fetch_price_series(&self, symbol: &str) -> Result<Vec<PricePoint>, MarketDataError>;
}

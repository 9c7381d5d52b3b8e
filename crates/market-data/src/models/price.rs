//! Price series model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One daily price sample for a token.
///
/// Timestamps are epoch milliseconds as delivered by the source.
/// A series of points carries no ordering guarantee; consumers sort
/// before any chronology-dependent computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Sample time in epoch milliseconds.
    pub timestamp: i64,
    /// Price in the source's quote currency.
    pub price: Decimal,
}

impl PricePoint {
    pub fn new(timestamp: i64, price: Decimal) -> Self {
        Self { timestamp, price }
    }
}

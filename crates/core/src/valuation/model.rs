//! Valuation result models.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Qualitative price position relative to the expected price.
///
/// Serialized with the human-readable labels the frontend displays
/// verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValuationRemarks {
    #[serde(rename = "Very Undervalued")]
    VeryUndervalued,
    #[serde(rename = "Undervalued")]
    Undervalued,
    #[serde(rename = "Fair Value")]
    FairValue,
    #[serde(rename = "Overvalued")]
    Overvalued,
    #[serde(rename = "Very Overvalued")]
    VeryOvervalued,
    /// No expected price could be derived.
    #[serde(rename = "Unknown")]
    Unknown,
}

impl ValuationRemarks {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VeryUndervalued => "Very Undervalued",
            Self::Undervalued => "Undervalued",
            Self::FairValue => "Fair Value",
            Self::Overvalued => "Overvalued",
            Self::VeryOvervalued => "Very Overvalued",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ValuationRemarks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Valuation metrics for one token at a point in time.
///
/// Immutable once assembled; a recomputation supersedes rather than
/// mutates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationResult {
    pub symbol: String,
    /// Latest sample price, in the source's quote currency.
    pub price: Decimal,
    /// Sum of the twelve monthly average deltas, in absolute price
    /// units. Not a percentage.
    pub apr: Decimal,
    /// Inverse coefficient-of-variation score in [0, 1].
    pub stability: Decimal,
    /// Total value locked. Zero when the supply source was unavailable.
    pub tvl: Decimal,
    pub remarks: ValuationRemarks,
    pub computed_at: DateTime<Utc>,
}

/// Cached TVL artifact for one token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TvlSnapshot {
    pub symbol: String,
    pub tvl: Decimal,
    pub as_of: DateTime<Utc>,
}

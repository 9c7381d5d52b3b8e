//! Valuation engine errors.

use thiserror::Error;

/// Errors from the pure valuation computations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValuationError {
    /// The price series is too short to derive an APR. Not retryable
    /// until the source has accumulated more history.
    #[error("Insufficient data for {symbol}: {got} points, need {need}")]
    InsufficientData {
        symbol: String,
        got: usize,
        need: usize,
    },

    /// Chunking the window produced fewer than two usable averages.
    #[error("Insufficient monthly data for {symbol}: {got} chunk averages")]
    InsufficientMonthlyData { symbol: String, got: usize },

    /// Internal consistency check: the monthly return series must carry
    /// exactly one entry per chunk.
    #[error("Unexpected return count for {symbol}: got {got}, expected {expected}")]
    UnexpectedReturnCount {
        symbol: String,
        got: usize,
        expected: usize,
    },
}

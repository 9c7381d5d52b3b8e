//! Shared constants for the valuation domain.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Trailing daily samples required before an APR can be computed.
pub const APR_WINDOW_DAYS: usize = 360;

/// Number of contiguous chunks the APR window is split into. Chunks are
/// fixed day counts, not calendar months.
pub const APR_MONTH_COUNT: usize = 12;

/// Most-recent samples averaged for the expected-price baseline.
pub const LAST_MONTH_WINDOW: usize = 30;

/// Deviation within ±0.1% of the expected price counts as fair value.
pub const FAIR_VALUE_BAND: Decimal = dec!(0.001);

/// Deviation beyond ±1% of the expected price counts as strongly
/// mispriced.
pub const STRONG_DEVIATION_BAND: Decimal = dec!(0.01);

// Cache key prefixes. One definition site so the orchestrator and the
// refresh endpoint cannot drift.
pub const PRICE_HISTORY_KEY_PREFIX: &str = "price_history";
pub const TVL_KEY_PREFIX: &str = "tvl";
pub const VALUATION_KEY_PREFIX: &str = "valuation";

/// Default TTL for cached price history, in seconds.
pub const DEFAULT_PRICE_HISTORY_TTL_SECS: u64 = 3600;

/// Default TTL for cached TVL snapshots, in seconds.
pub const DEFAULT_TVL_TTL_SECS: u64 = 300;

/// Default TTL for cached valuation results, in seconds.
pub const DEFAULT_VALUATION_TTL_SECS: u64 = 600;

//! Pure valuation computations over a daily price series.
//!
//! Everything here is deterministic and free of I/O: the orchestrator
//! feeds in a fetched series and a TVL figure, and gets back the
//! assembled [`ValuationResult`]. The APR window is a fixed day count
//! split into fixed-size chunks; calendar months play no part.

use chrono::Utc;
use log::debug;
use rust_decimal::{Decimal, MathematicalOps};

use stakelens_market_data::PricePoint;

use super::errors::ValuationError;
use super::model::{ValuationRemarks, ValuationResult};
use crate::constants::{
    APR_MONTH_COUNT, APR_WINDOW_DAYS, FAIR_VALUE_BAND, LAST_MONTH_WINDOW, STRONG_DEVIATION_BAND,
};

/// Annualized price-return signal for a token.
///
/// The trailing window is split into [`APR_MONTH_COUNT`] contiguous
/// chunks and the APR is the sum of the deltas between consecutive chunk
/// averages, which telescopes to `last average - first average`. The
/// result is in absolute price units, not a percentage.
pub fn calculate_apr(series: &[PricePoint], symbol: &str) -> Result<Decimal, ValuationError> {
    if series.len() < APR_WINDOW_DAYS {
        return Err(ValuationError::InsufficientData {
            symbol: symbol.to_string(),
            got: series.len(),
            need: APR_WINDOW_DAYS,
        });
    }

    // --- 1. Order the series and take the trailing window ---
    let sorted = sorted_ascending(series);
    let window_len = APR_WINDOW_DAYS.min(sorted.len());
    let window = &sorted[..window_len];

    // --- 2. Average price per chunk ---
    let monthly_averages = chunk_averages(window, APR_MONTH_COUNT);
    if monthly_averages.len() < 2 {
        return Err(ValuationError::InsufficientMonthlyData {
            symbol: symbol.to_string(),
            got: monthly_averages.len(),
        });
    }

    // --- 3. Month-over-month deltas, anchored with a zero first entry ---
    let mut monthly_returns = Vec::with_capacity(monthly_averages.len());
    monthly_returns.push(Decimal::ZERO);
    for pair in monthly_averages.windows(2) {
        monthly_returns.push(pair[1] - pair[0]);
    }

    if monthly_returns.len() != APR_MONTH_COUNT {
        return Err(ValuationError::UnexpectedReturnCount {
            symbol: symbol.to_string(),
            got: monthly_returns.len(),
            expected: APR_MONTH_COUNT,
        });
    }

    // --- 4. Sum the deltas ---
    let apr: Decimal = monthly_returns.iter().sum();
    debug!("APR for {}: {}", symbol, apr);
    Ok(apr)
}

/// Inverse coefficient-of-variation score in [0, 1].
///
/// Fewer than two returns is defined as maximally stable (1); a zero
/// mean cannot support a coefficient of variation and scores 0.
pub fn calculate_stability(daily_returns: &[Decimal]) -> Decimal {
    if daily_returns.len() < 2 {
        return Decimal::ONE;
    }

    let count = Decimal::from(daily_returns.len());
    let mean = daily_returns.iter().sum::<Decimal>() / count;
    if mean.is_zero() {
        return Decimal::ZERO;
    }

    // Population variance (divide by n, not n - 1).
    let variance = daily_returns
        .iter()
        .map(|r| {
            let delta = *r - mean;
            delta * delta
        })
        .sum::<Decimal>()
        / count;
    let std_dev = variance.sqrt().unwrap_or(Decimal::ZERO);

    let cv = (std_dev / mean).abs();
    Decimal::ONE / (Decimal::ONE + cv)
}

/// Classification of the current price against the expected price.
///
/// Bands are symmetric: within ±0.1% is fair value, beyond ±1% is a
/// strong deviation, and both fair boundaries are inclusive.
pub fn classify_valuation(current_price: Decimal, expected_price: Decimal) -> ValuationRemarks {
    if expected_price.is_zero() {
        return ValuationRemarks::Unknown;
    }

    let deviation = (current_price - expected_price) / expected_price;

    if deviation <= -STRONG_DEVIATION_BAND {
        ValuationRemarks::VeryUndervalued
    } else if deviation < -FAIR_VALUE_BAND {
        ValuationRemarks::Undervalued
    } else if deviation <= FAIR_VALUE_BAND {
        ValuationRemarks::FairValue
    } else if deviation < STRONG_DEVIATION_BAND {
        ValuationRemarks::Overvalued
    } else {
        ValuationRemarks::VeryOvervalued
    }
}

/// Assembles the full valuation for a token from its price series and
/// TVL.
///
/// The series may arrive in any order. TVL passes through untouched;
/// the zero-fallback on supply failure is the orchestrator's decision,
/// not the engine's.
pub fn compute_valuation(
    symbol: &str,
    series: &[PricePoint],
    tvl: Decimal,
) -> Result<ValuationResult, ValuationError> {
    // --- 1. APR over the trailing window ---
    let apr = calculate_apr(series, symbol)?;

    // --- 2. Day-over-day relative returns, oldest to newest ---
    let sorted = sorted_ascending(series);
    let returns = daily_returns(&sorted);

    // --- 3. Stability score ---
    let stability = calculate_stability(&returns);

    // --- 4. Latest sample price ---
    let current_price = sorted.last().map(|p| p.price).unwrap_or(Decimal::ZERO);

    // --- 5. Baseline: average over the most recent month of samples ---
    let last_month_avg = if sorted.len() >= LAST_MONTH_WINDOW {
        mean_price(&sorted[sorted.len() - LAST_MONTH_WINDOW..])
    } else {
        current_price
    };

    // --- 6. Expected price: half an average month's delta on top of the baseline ---
    let expected_price =
        (apr / Decimal::from(APR_MONTH_COUNT as i64)) / Decimal::TWO + last_month_avg;

    // --- 7. Classify ---
    let remarks = classify_valuation(current_price, expected_price);
    debug!(
        "Valuation for {}: price={} expected={} remarks={}",
        symbol, current_price, expected_price, remarks
    );

    Ok(ValuationResult {
        symbol: symbol.to_string(),
        price: current_price,
        apr,
        stability,
        tvl,
        remarks,
        computed_at: Utc::now(),
    })
}

/// Stable ascending copy of the series. Points sharing a timestamp keep
/// their input order, so the last-seen one wins `last()`.
fn sorted_ascending(series: &[PricePoint]) -> Vec<PricePoint> {
    let mut sorted = series.to_vec();
    sorted.sort_by_key(|p| p.timestamp);
    sorted
}

/// Splits the window into `chunks` contiguous runs of `len / chunks`
/// samples, the final run absorbing any remainder, and returns each
/// run's mean price. Returns an empty vec when the window cannot fill
/// one sample per chunk.
fn chunk_averages(window: &[PricePoint], chunks: usize) -> Vec<Decimal> {
    let chunk_size = window.len() / chunks;
    if chunk_size == 0 {
        return Vec::new();
    }

    let mut averages = Vec::with_capacity(chunks);
    for chunk in 0..chunks {
        let start = chunk * chunk_size;
        let end = if chunk == chunks - 1 {
            window.len()
        } else {
            start + chunk_size
        };
        averages.push(mean_price(&window[start..end]));
    }
    averages
}

/// Day-over-day relative returns; pairs whose previous price is not
/// positive are skipped rather than dividing by zero.
fn daily_returns(sorted: &[PricePoint]) -> Vec<Decimal> {
    let mut returns = Vec::with_capacity(sorted.len().saturating_sub(1));
    for pair in sorted.windows(2) {
        let prev = pair[0].price;
        if prev > Decimal::ZERO {
            returns.push(pair[1].price / prev - Decimal::ONE);
        }
    }
    returns
}

fn mean_price(points: &[PricePoint]) -> Decimal {
    if points.is_empty() {
        return Decimal::ZERO;
    }
    let sum: Decimal = points.iter().map(|p| p.price).sum();
    sum / Decimal::from(points.len())
}

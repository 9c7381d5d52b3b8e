//! Property-based tests for the valuation engine.
//!
//! These verify that universal properties hold across randomly generated
//! price series, using the `proptest` crate for test case generation.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use stakelens_core::constants::APR_WINDOW_DAYS;
use stakelens_core::valuation::engine::{
    calculate_apr, calculate_stability, classify_valuation, compute_valuation,
};
use stakelens_core::valuation::{ValuationError, ValuationRemarks};
use stakelens_market_data::PricePoint;

const DAY_MS: i64 = 86_400_000;

// =============================================================================
// Generators
// =============================================================================

/// A price in (0, 100) with four decimal places.
fn arb_price() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000).prop_map(|mantissa| Decimal::new(mantissa, 4))
}

/// A daily series long enough for an APR, with unique ascending
/// timestamps.
fn arb_series() -> impl Strategy<Value = Vec<PricePoint>> {
    prop::collection::vec(arb_price(), APR_WINDOW_DAYS..400).prop_map(|prices| {
        prices
            .into_iter()
            .enumerate()
            .map(|(i, price)| PricePoint::new(i as i64 * DAY_MS, price))
            .collect()
    })
}

/// A series too short for an APR.
fn arb_short_series() -> impl Strategy<Value = Vec<PricePoint>> {
    prop::collection::vec(arb_price(), 0..APR_WINDOW_DAYS).prop_map(|prices| {
        prices
            .into_iter()
            .enumerate()
            .map(|(i, price)| PricePoint::new(i as i64 * DAY_MS, price))
            .collect()
    })
}

/// Daily returns in (-50%, +50%).
fn arb_returns() -> impl Strategy<Value = Vec<Decimal>> {
    prop::collection::vec(
        (-5_000i64..5_000).prop_map(|mantissa| Decimal::new(mantissa, 4)),
        0..60,
    )
}

fn mean(points: &[PricePoint]) -> Decimal {
    points.iter().map(|p| p.price).sum::<Decimal>() / Decimal::from(points.len())
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    /// The APR must not depend on the order points arrive in.
    #[test]
    fn prop_apr_is_input_order_invariant(series in arb_series().prop_shuffle()) {
        let mut sorted = series.clone();
        sorted.sort_by_key(|p| p.timestamp);

        prop_assert_eq!(
            calculate_apr(&series, "wstETH").unwrap(),
            calculate_apr(&sorted, "wstETH").unwrap()
        );
    }

    /// The chunk deltas telescope: the APR equals the last chunk average
    /// minus the first, over the 360-sample window.
    #[test]
    fn prop_apr_telescopes_to_first_and_last_chunk(series in arb_series()) {
        let apr = calculate_apr(&series, "wstETH").unwrap();

        let window = &series[..APR_WINDOW_DAYS];
        let chunk = APR_WINDOW_DAYS / 12;
        let expected = mean(&window[window.len() - chunk..]) - mean(&window[..chunk]);
        prop_assert_eq!(apr, expected);
    }

    /// Anything shorter than the window is rejected, never approximated.
    #[test]
    fn prop_apr_rejects_short_series(series in arb_short_series()) {
        let got = series.len();
        prop_assert_eq!(
            calculate_apr(&series, "rETH"),
            Err(ValuationError::InsufficientData {
                symbol: "rETH".to_string(),
                got,
                need: APR_WINDOW_DAYS,
            })
        );
    }

    /// Stability is a score, always within [0, 1].
    #[test]
    fn prop_stability_is_bounded(returns in arb_returns()) {
        let stability = calculate_stability(&returns);
        prop_assert!(stability >= Decimal::ZERO);
        prop_assert!(stability <= Decimal::ONE);
    }

    /// Classification covers every band consistently for any positive
    /// expected price.
    #[test]
    fn prop_classification_bands_from_multipliers(expected in arb_price()) {
        let cases = [
            (dec!(0.98), ValuationRemarks::VeryUndervalued),
            (dec!(0.995), ValuationRemarks::Undervalued),
            (dec!(1), ValuationRemarks::FairValue),
            (dec!(1.0005), ValuationRemarks::FairValue),
            (dec!(1.005), ValuationRemarks::Overvalued),
            (dec!(1.02), ValuationRemarks::VeryOvervalued),
        ];
        for (multiplier, remarks) in cases {
            prop_assert_eq!(classify_valuation(expected * multiplier, expected), remarks);
        }
    }

    /// A constant price series has zero APR, zero stability (the mean
    /// return is zero), and sits exactly at fair value.
    #[test]
    fn prop_constant_series_valuation(price in arb_price(), tvl in arb_price()) {
        let series: Vec<PricePoint> = (0..APR_WINDOW_DAYS)
            .map(|i| PricePoint::new(i as i64 * DAY_MS, price))
            .collect();

        let result = compute_valuation("CBETH", &series, tvl).unwrap();
        prop_assert_eq!(result.apr, Decimal::ZERO);
        prop_assert_eq!(result.stability, Decimal::ZERO);
        prop_assert_eq!(result.price, price);
        prop_assert_eq!(result.tvl, tvl);
        prop_assert_eq!(result.remarks, ValuationRemarks::FairValue);
    }

    /// The full computation is deterministic for a fixed input.
    #[test]
    fn prop_compute_valuation_is_pure(series in arb_series(), tvl in arb_price()) {
        let first = compute_valuation("wstETH", &series, tvl).unwrap();
        let second = compute_valuation("wstETH", &series, tvl).unwrap();

        prop_assert_eq!(first.price, second.price);
        prop_assert_eq!(first.apr, second.apr);
        prop_assert_eq!(first.stability, second.stability);
        prop_assert_eq!(first.remarks, second.remarks);
    }
}

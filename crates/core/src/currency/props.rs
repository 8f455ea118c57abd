//! Property-based tests for currency operations.
//!
//! - Round trip through any currency stays within rounding tolerance
//! - Display values carry at most two decimal places
//! - Percentage allocation sums to exactly 100

use hamyon_shared::Currency;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::allocation::AllocationUtil;
use super::rates::rate;
use super::service::CurrencyService;

/// Strategy to generate positive decimal amounts (0.01 to 1,000,000,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn any_currency() -> impl Strategy<Value = Currency> {
    prop::sample::select(Currency::ALL.to_vec())
}

/// Strategy to generate 1-12 non-negative weights with a positive sum.
fn weights() -> impl Strategy<Value = Vec<Decimal>> {
    prop::collection::vec(0i64..10_000_000i64, 1..12)
        .prop_filter("sum must be positive", |v| v.iter().any(|w| *w > 0))
        .prop_map(|v| v.into_iter().map(|w| Decimal::new(w, 2)).collect())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Converting A → C → A with display rounding loses at most half a
    /// display unit of C (expressed in A) plus half a display unit of A.
    #[test]
    fn prop_round_trip_within_tolerance(
        amount in positive_amount(),
        from in any_currency(),
        via in any_currency(),
    ) {
        let there = CurrencyService::convert(amount, from, via);
        let back = CurrencyService::convert(there, via, from);

        let half_unit = Decimal::new(5, 3);
        let tolerance = half_unit * rate(via) / rate(from) + half_unit + Decimal::new(1, 10);
        prop_assert!(
            (back - amount).abs() <= tolerance,
            "{} {} -> {} {} -> {} (tolerance {})",
            amount, from, there, via, back, tolerance
        );
    }

    /// Exact conversion round trips without meaningful loss.
    #[test]
    fn prop_exact_round_trip(
        amount in positive_amount(),
        from in any_currency(),
        via in any_currency(),
    ) {
        let there = CurrencyService::convert_exact(amount, from, via);
        let back = CurrencyService::convert_exact(there, via, from);
        prop_assert!((back - amount).abs() <= Decimal::new(1, 12));
    }

    /// Display conversions have at most 2 decimal places.
    #[test]
    fn prop_convert_has_display_precision(
        amount in positive_amount(),
        from in any_currency(),
        to in any_currency(),
    ) {
        let result = CurrencyService::convert(amount, from, to);
        prop_assert!(result.scale() <= 2, "{} has scale {}", result, result.scale());
    }

    /// Converting to base never loses precision.
    #[test]
    fn prop_to_base_is_exact(amount in positive_amount(), from in any_currency()) {
        let base = CurrencyService::to_base(amount, from);
        prop_assert_eq!(base / rate(from), amount);
    }

    /// Percentages over a positive total sum to exactly 100.
    #[test]
    fn prop_percentages_sum_to_100(weights in weights()) {
        let result = AllocationUtil::percentages(&weights, 1);
        prop_assert_eq!(result.len(), weights.len());
        prop_assert_eq!(result.iter().copied().sum::<Decimal>(), Decimal::ONE_HUNDRED);
        for p in &result {
            prop_assert!(*p >= Decimal::ZERO && *p <= Decimal::ONE_HUNDRED);
        }
    }

    /// Leaving the last share out keeps the listed sum at or below 100.
    #[test]
    fn prop_partial_percentages_at_most_100(weights in weights(), extra in 0i64..10_000_000i64) {
        let mut all = weights.clone();
        all.push(Decimal::new(extra, 2));
        let result = AllocationUtil::percentages(&all, 1);
        let listed: Decimal = result[..weights.len()].iter().copied().sum();
        prop_assert!(listed <= Decimal::ONE_HUNDRED);
    }
}

//! Percentage allocation using the Largest Remainder Method.
//!
//! Shares are computed exactly, truncated to the target precision, and the
//! leftover units go to the shares with the largest truncated fractions. The
//! rounded shares of a positive total therefore sum to exactly 100.

use rust_decimal::Decimal;
use rust_decimal::prelude::*;

/// Allocation utility for distributing percentages.
pub struct AllocationUtil;

impl AllocationUtil {
    /// Splits 100% across `weights` proportionally.
    ///
    /// Returns one percentage per weight, each rounded to `decimal_places`.
    /// When the weights sum to zero every share is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use hamyon_core::currency::AllocationUtil;
    ///
    /// // 1/3 each: [33.4, 33.3, 33.3]
    /// let result = AllocationUtil::percentages(&[dec!(1), dec!(1), dec!(1)], 1);
    /// assert_eq!(result.iter().sum::<rust_decimal::Decimal>(), dec!(100));
    /// ```
    #[must_use]
    pub fn percentages(weights: &[Decimal], decimal_places: u32) -> Vec<Decimal> {
        let total: Decimal = weights.iter().copied().sum();
        if total <= Decimal::ZERO {
            return vec![Decimal::ZERO; weights.len()];
        }

        let hundred = Decimal::ONE_HUNDRED;
        let unit = Decimal::new(1, decimal_places);

        let exact: Vec<Decimal> = weights.iter().map(|w| *w * hundred / total).collect();

        let mut rounded: Vec<Decimal> = exact
            .iter()
            .map(|a| a.round_dp_with_strategy(decimal_places, RoundingStrategy::ToZero))
            .collect();

        // Exact: both sides are multiples of `unit`.
        let sum_rounded: Decimal = rounded.iter().copied().sum();
        let remainder = hundred - sum_rounded;

        let units_to_distribute = (remainder / unit)
            .round_dp_with_strategy(0, RoundingStrategy::ToZero)
            .to_usize()
            .unwrap_or(0);

        if units_to_distribute == 0 {
            return rounded;
        }

        let mut remainders: Vec<(usize, Decimal)> = exact
            .iter()
            .zip(rounded.iter())
            .enumerate()
            .map(|(i, (e, r))| (i, *e - *r))
            .collect();

        // Largest fraction first; ties go to the earlier entry.
        remainders.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

        for (idx, _) in remainders.iter().take(units_to_distribute) {
            rounded[*idx] += unit;
        }

        rounded
    }
}

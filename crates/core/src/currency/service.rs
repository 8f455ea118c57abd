//! Currency service for conversion operations.
//!
//! Conversions go through the base currency: `amount × rate(from) / rate(to)`.
//! Display values are rounded with Banker's Rounding (MidpointNearestEven).

use hamyon_shared::Currency;
use rust_decimal::Decimal;
use rust_decimal::prelude::*;

use super::rates::rate;

/// Decimal places of every monetary value returned to clients.
pub const DISPLAY_DECIMAL_PLACES: u32 = 2;

/// Currency service for conversion operations.
pub struct CurrencyService;

impl CurrencyService {
    /// Converts an amount to the base currency. Exact, since every rate is an
    /// integer.
    #[must_use]
    pub fn to_base(amount: Decimal, from: Currency) -> Decimal {
        amount * rate(from)
    }

    /// Converts a base-currency amount to `to`, unrounded.
    #[must_use]
    pub fn from_base(amount: Decimal, to: Currency) -> Decimal {
        amount / rate(to)
    }

    /// Converts between two currencies without rounding.
    #[must_use]
    pub fn convert_exact(amount: Decimal, from: Currency, to: Currency) -> Decimal {
        if from == to {
            return amount;
        }
        Self::from_base(Self::to_base(amount, from), to)
    }

    /// Converts between two currencies, rounded to display precision.
    ///
    /// # Example
    ///
    /// ```
    /// use hamyon_core::currency::CurrencyService;
    /// use hamyon_shared::Currency;
    /// use rust_decimal_macros::dec;
    ///
    /// let result = CurrencyService::convert(dec!(100), Currency::Usd, Currency::Uzs);
    /// assert_eq!(result, dec!(1250000));
    /// ```
    #[must_use]
    pub fn convert(amount: Decimal, from: Currency, to: Currency) -> Decimal {
        Self::round_display(Self::convert_exact(amount, from, to))
    }

    /// Rounds a value to display precision using Banker's Rounding.
    #[must_use]
    pub fn round_display(value: Decimal) -> Decimal {
        Self::round(value, DISPLAY_DECIMAL_PLACES)
    }

    /// Round a decimal value using Banker's Rounding.
    ///
    /// - Rounds 2.5 → 2 (to nearest even)
    /// - Rounds 3.5 → 4 (to nearest even)
    /// - Rounds 2.25 → 2.2 (to nearest even at 1 decimal)
    #[must_use]
    pub fn round(value: Decimal, decimal_places: u32) -> Decimal {
        value
            .round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointNearestEven)
            .normalize()
    }
}

//! The fixed exchange rate table.

use hamyon_shared::Currency;
use rust_decimal::Decimal;
use serde::Serialize;

/// Currency every rate is quoted against.
pub const BASE_CURRENCY: Currency = Currency::Uzs;

/// Units of the base currency per one unit of `currency`.
#[must_use]
pub fn rate(currency: Currency) -> Decimal {
    match currency {
        Currency::Uzs => Decimal::ONE,
        Currency::Usd => Decimal::from(12_500),
        Currency::Eur => Decimal::from(13_500),
        Currency::Cny => Decimal::from(1_740),
        Currency::Rub => Decimal::from(130),
    }
}

/// One row of the public rate table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrencyRate {
    /// ISO 4217 code.
    pub code: Currency,
    /// Display name.
    pub name: &'static str,
    /// Display symbol.
    pub symbol: &'static str,
    /// Units of the base currency per one unit.
    #[serde(with = "rust_decimal::serde::float")]
    pub rate: Decimal,
    /// True for the base currency.
    pub is_base: bool,
}

/// Returns the full rate table, base currency first.
#[must_use]
pub fn rate_table() -> Vec<CurrencyRate> {
    Currency::ALL
        .iter()
        .map(|&currency| CurrencyRate {
            code: currency,
            name: currency.name(),
            symbol: currency.symbol(),
            rate: rate(currency),
            is_base: currency == BASE_CURRENCY,
        })
        .collect()
}

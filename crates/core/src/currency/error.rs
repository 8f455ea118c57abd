//! Currency errors.

use hamyon_shared::Currency;
use hamyon_shared::types::UnsupportedCurrency;
use thiserror::Error;

/// Errors from currency handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurrencyError {
    /// The code is not in the rate table.
    #[error(transparent)]
    Unsupported(#[from] UnsupportedCurrency),
}

/// Parses an optional currency code, defaulting to the base currency when the
/// code is missing or blank.
pub fn parse_currency(code: Option<&str>) -> Result<Currency, CurrencyError> {
    match code.map(str::trim) {
        None | Some("") => Ok(Currency::default()),
        Some(code) => Ok(code.parse::<Currency>()?),
    }
}

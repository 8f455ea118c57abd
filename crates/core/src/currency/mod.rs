//! Multi-currency handling over a fixed rate table.
//!
//! Every supported currency has a fixed rate against the base unit (UZS).
//! Amounts are converted to base exactly, summed, and converted once to the
//! display currency.

pub mod allocation;
pub mod error;
pub mod rates;
pub mod service;

#[cfg(test)]
mod props;

pub use allocation::AllocationUtil;
pub use error::{CurrencyError, parse_currency};
pub use rates::{BASE_CURRENCY, CurrencyRate, rate, rate_table};
pub use service::{CurrencyService, DISPLAY_DECIMAL_PLACES};

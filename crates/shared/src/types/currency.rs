//! Supported currency codes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// ISO 4217 currency codes supported by the system.
///
/// UZS is the base unit every other currency is converted through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Uzbek Som
    #[default]
    Uzs,
    /// US Dollar
    Usd,
    /// Euro
    Eur,
    /// Chinese Yuan
    Cny,
    /// Russian Ruble
    Rub,
}

/// Error returned when parsing an unknown currency code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unsupported currency: {0}")]
pub struct UnsupportedCurrency(pub String);

impl Currency {
    /// Every supported currency, base first.
    pub const ALL: [Self; 5] = [Self::Uzs, Self::Usd, Self::Eur, Self::Cny, Self::Rub];

    /// Returns the ISO 4217 code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Uzs => "UZS",
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Cny => "CNY",
            Self::Rub => "RUB",
        }
    }

    /// Returns the display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Uzs => "Uzbek som",
            Self::Usd => "US dollar",
            Self::Eur => "Euro",
            Self::Cny => "Chinese yuan",
            Self::Rub => "Russian ruble",
        }
    }

    /// Returns the display symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Uzs => "so'm",
            Self::Usd => "$",
            Self::Eur => "€",
            Self::Cny => "¥",
            Self::Rub => "₽",
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Currency {
    type Err = UnsupportedCurrency;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "UZS" => Ok(Self::Uzs),
            "USD" => Ok(Self::Usd),
            "EUR" => Ok(Self::Eur),
            "CNY" => Ok(Self::Cny),
            "RUB" => Ok(Self::Rub),
            _ => Err(UnsupportedCurrency(s.to_string())),
        }
    }
}

//! Transaction domain types and input validation.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use hamyon_shared::Currency;
use hamyon_shared::types::{CategoryId, TransactionId};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest amount accepted for a single transaction, in its own currency.
pub const MAX_AMOUNT: Decimal = dec!(1_000_000_000_000);

/// Maximum description length in characters.
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// Direction of a money movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Adds to the balance.
    Income,
    /// Subtracts from the balance.
    Expense,
}

impl TransactionKind {
    /// Lowercase wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = TransactionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(TransactionError::InvalidKind(s.to_string())),
        }
    }
}

/// Errors from transaction validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionError {
    /// Kind is not income or expense.
    #[error("Invalid transaction type: {0}. Expected income or expense")]
    InvalidKind(String),

    /// Amount is zero or negative.
    #[error("Amount must be positive")]
    NonPositiveAmount,

    /// Amount exceeds `MAX_AMOUNT`.
    #[error("Amount exceeds the maximum of 1000000000000")]
    AmountTooLarge,

    /// Description is longer than `MAX_DESCRIPTION_LEN`.
    #[error("Description must be at most 500 characters")]
    DescriptionTooLong,

    /// Category kind does not match the transaction kind.
    #[error("Category is for {category} transactions, not {transaction}")]
    CategoryKindMismatch {
        /// Kind of the category.
        category: TransactionKind,
        /// Kind of the transaction.
        transaction: TransactionKind,
    },
}

/// Owner-scoped transaction as seen by the aggregator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    /// Transaction ID.
    pub id: TransactionId,
    /// Income or expense.
    pub kind: TransactionKind,
    /// Amount in `currency`, non-negative.
    pub amount: Decimal,
    /// Currency the amount was recorded in.
    pub currency: Currency,
    /// Category, if any.
    pub category_id: Option<CategoryId>,
    /// Calendar date of the movement.
    pub date: NaiveDate,
    /// Free-form description.
    pub description: String,
    /// Creation timestamp, used to order same-day records.
    pub created_at: DateTime<Utc>,
}

/// Validates an amount for a new or edited transaction.
pub fn validate_amount(amount: Decimal) -> Result<(), TransactionError> {
    if amount <= Decimal::ZERO {
        return Err(TransactionError::NonPositiveAmount);
    }
    if amount > MAX_AMOUNT {
        return Err(TransactionError::AmountTooLarge);
    }
    Ok(())
}

/// Validates a description length.
pub fn validate_description(description: &str) -> Result<(), TransactionError> {
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(TransactionError::DescriptionTooLong);
    }
    Ok(())
}

/// Checks that a category can hold transactions of `kind`.
pub fn validate_category_kind(
    category: TransactionKind,
    transaction: TransactionKind,
) -> Result<(), TransactionError> {
    if category != transaction {
        return Err(TransactionError::CategoryKindMismatch {
            category,
            transaction,
        });
    }
    Ok(())
}

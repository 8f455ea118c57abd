//! Dashboard response types.
//!
//! Monetary values and percentages serialize as JSON numbers.

use chrono::NaiveDate;
use hamyon_shared::Currency;
use hamyon_shared::types::{CategoryId, TransactionId};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::transaction::TransactionKind;

/// Serializes a slice of decimals as JSON numbers.
mod float_seq {
    use rust_decimal::Decimal;
    use rust_decimal::prelude::ToPrimitive;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(values: &[Decimal], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(values.iter().map(|v| v.to_f64().unwrap_or_default()))
    }
}

/// Totals and changes for the dashboard header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    /// All-time income in the display currency.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_income: Decimal,
    /// All-time expense in the display currency.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_expense: Decimal,
    /// `total_income - total_expense`.
    #[serde(with = "rust_decimal::serde::float")]
    pub current_balance: Decimal,
    /// Income change vs the previous window, in percent.
    #[serde(with = "rust_decimal::serde::float")]
    pub income_change: Decimal,
    /// Expense change vs the previous window, in percent.
    #[serde(with = "rust_decimal::serde::float")]
    pub expense_change: Decimal,
    /// Net balance change vs the previous window, in percent.
    #[serde(with = "rust_decimal::serde::float")]
    pub balance_change: Decimal,
    /// Display currency.
    pub currency: Currency,
    /// Newest transactions, newest first.
    pub recent_transactions: Vec<RecentTransaction>,
}

impl DashboardSummary {
    /// Attaches the recent transaction list.
    #[must_use]
    pub fn with_recent(mut self, recent: Vec<RecentTransaction>) -> Self {
        self.recent_transactions = recent;
        self
    }
}

/// One row of the recent transactions list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecentTransaction {
    /// Transaction ID.
    pub id: TransactionId,
    /// Income or expense.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Amount in the display currency.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// Display currency.
    pub currency: Currency,
    /// Amount as recorded.
    #[serde(with = "rust_decimal::serde::float")]
    pub original_amount: Decimal,
    /// Currency as recorded.
    pub original_currency: Currency,
    /// Category name, if categorized.
    pub category_name: Option<String>,
    /// Category icon, or the default icon.
    pub category_icon: String,
    /// Transaction date.
    pub date: NaiveDate,
    /// Description.
    pub description: String,
}

/// Daily chart series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartData {
    /// `MM-DD` label per day, oldest first.
    pub labels: Vec<String>,
    /// Income per day in the display currency.
    #[serde(with = "float_seq")]
    pub income_data: Vec<Decimal>,
    /// Expense per day in the display currency.
    #[serde(with = "float_seq")]
    pub expense_data: Vec<Decimal>,
    /// Display currency.
    pub currency: Currency,
}

/// Totals for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryStat {
    /// Category ID.
    pub id: CategoryId,
    /// Category name.
    pub name: String,
    /// Icon class.
    pub icon: String,
    /// Hex color.
    pub color: String,
    /// Total in the display currency.
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    /// Number of transactions.
    pub count: u64,
    /// Share of the overall total, one decimal place.
    #[serde(with = "rust_decimal::serde::float")]
    pub percentage: Decimal,
}

//! Dashboard aggregation.
//!
//! This module provides:
//! - Summary totals with period-over-period changes
//! - Daily income/expense chart series
//! - Category breakdowns with percentages
//! - Recent transaction listing
//!
//! Every function works on records already filtered to one owner.

pub mod aggregate;
pub mod types;

#[cfg(test)]
mod props;

pub use aggregate::{
    category_breakdown, change_percent, daily_series, recent_transactions, summarize,
};
pub use types::*;

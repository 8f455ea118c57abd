//! Aggregation over an owner's transactions.
//!
//! Sums are taken in the base currency (exact) and converted once to the
//! display currency at the end, then rounded with Banker's Rounding.

use std::collections::{BTreeMap, HashMap};

use hamyon_shared::Currency;
use hamyon_shared::types::CategoryId;
use rust_decimal::Decimal;

use super::types::{CategoryStat, ChartData, DashboardSummary, RecentTransaction};
use crate::category::{CategoryInfo, DEFAULT_ICON};
use crate::currency::{AllocationUtil, CurrencyService};
use crate::period::DateWindow;
use crate::transaction::{TransactionKind, TransactionRecord};

/// Label format for chart days.
const LABEL_FORMAT: &str = "%m-%d";

/// Decimal places of period-over-period changes.
const CHANGE_DECIMAL_PLACES: u32 = 2;
/// Decimal places of category shares.
const SHARE_DECIMAL_PLACES: u32 = 1;

fn base_total<'a>(records: impl IntoIterator<Item = &'a TransactionRecord>) -> Decimal {
    records
        .into_iter()
        .map(|r| CurrencyService::to_base(r.amount, r.currency))
        .sum()
}

fn to_display(base: Decimal, currency: Currency) -> Decimal {
    CurrencyService::round_display(CurrencyService::from_base(base, currency))
}

/// Base totals of one kind inside a window.
fn window_total(records: &[TransactionRecord], window: &DateWindow, kind: TransactionKind) -> Decimal {
    base_total(
        records
            .iter()
            .filter(|r| r.kind == kind && window.contains(r.date)),
    )
}

/// Percentage change from `previous` to `current`, rounded to 2 places.
///
/// A `previous` of zero or below has no meaningful base: the change is 100
/// for a positive `current` and 0 otherwise.
#[must_use]
pub fn change_percent(current: Decimal, previous: Decimal) -> Decimal {
    if previous <= Decimal::ZERO {
        return if current > Decimal::ZERO {
            Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        };
    }
    let change = (current - previous) / previous * Decimal::ONE_HUNDRED;
    CurrencyService::round(change, CHANGE_DECIMAL_PLACES)
}

/// Computes the dashboard summary.
///
/// Totals cover every record passed in. Changes compare `window` with the
/// window of equal length before it. The returned summary has no recent
/// transactions; attach them with [`DashboardSummary::with_recent`].
#[must_use]
pub fn summarize(
    records: &[TransactionRecord],
    window: &DateWindow,
    display_currency: Currency,
) -> DashboardSummary {
    let income_base = base_total(records.iter().filter(|r| r.kind == TransactionKind::Income));
    let expense_base = base_total(records.iter().filter(|r| r.kind == TransactionKind::Expense));

    let total_income = to_display(income_base, display_currency);
    let total_expense = to_display(expense_base, display_currency);

    let previous = window.previous();
    let income_now = window_total(records, window, TransactionKind::Income);
    let income_before = window_total(records, &previous, TransactionKind::Income);
    let expense_now = window_total(records, window, TransactionKind::Expense);
    let expense_before = window_total(records, &previous, TransactionKind::Expense);

    DashboardSummary {
        total_income,
        total_expense,
        current_balance: total_income - total_expense,
        income_change: change_percent(income_now, income_before),
        expense_change: change_percent(expense_now, expense_before),
        balance_change: change_percent(income_now - expense_now, income_before - expense_before),
        currency: display_currency,
        recent_transactions: Vec::new(),
    }
}

/// Builds one income/expense bucket per day of `window`, oldest first.
///
/// Days without transactions are zero.
#[must_use]
pub fn daily_series(
    records: &[TransactionRecord],
    window: &DateWindow,
    display_currency: Currency,
) -> ChartData {
    let mut buckets: BTreeMap<_, (Decimal, Decimal)> =
        window.days().map(|day| (day, (Decimal::ZERO, Decimal::ZERO))).collect();

    for record in records {
        if let Some((income, expense)) = buckets.get_mut(&record.date) {
            let base = CurrencyService::to_base(record.amount, record.currency);
            match record.kind {
                TransactionKind::Income => *income += base,
                TransactionKind::Expense => *expense += base,
            }
        }
    }

    let mut chart = ChartData {
        labels: Vec::with_capacity(buckets.len()),
        income_data: Vec::with_capacity(buckets.len()),
        expense_data: Vec::with_capacity(buckets.len()),
        currency: display_currency,
    };
    for (day, (income, expense)) in buckets {
        chart.labels.push(day.format(LABEL_FORMAT).to_string());
        chart.income_data.push(to_display(income, display_currency));
        chart.expense_data.push(to_display(expense, display_currency));
    }
    chart
}

/// Groups records of `kind` inside `window` by category.
///
/// Records without a known category count toward the overall total but are
/// not listed. Percentages use the Largest Remainder Method, so the listed
/// shares sum to exactly 100 when every record is categorized.
#[must_use]
pub fn category_breakdown(
    records: &[TransactionRecord],
    categories: &[CategoryInfo],
    window: &DateWindow,
    kind: TransactionKind,
    display_currency: Currency,
) -> Vec<CategoryStat> {
    let lookup: HashMap<CategoryId, &CategoryInfo> =
        categories.iter().map(|c| (c.id, c)).collect();

    let mut grouped: HashMap<CategoryId, (Decimal, u64)> = HashMap::new();
    let mut uncategorized = Decimal::ZERO;

    for record in records
        .iter()
        .filter(|r| r.kind == kind && window.contains(r.date))
    {
        let base = CurrencyService::to_base(record.amount, record.currency);
        match record.category_id.filter(|id| lookup.contains_key(id)) {
            Some(id) => {
                let entry = grouped.entry(id).or_insert((Decimal::ZERO, 0));
                entry.0 += base;
                entry.1 += 1;
            }
            None => uncategorized += base,
        }
    }

    let mut rows: Vec<(&CategoryInfo, Decimal, u64)> = grouped
        .into_iter()
        .filter_map(|(id, (base, count))| lookup.get(&id).map(|info| (*info, base, count)))
        .collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.name.cmp(&b.0.name)));

    let mut weights: Vec<Decimal> = rows.iter().map(|(_, base, _)| *base).collect();
    weights.push(uncategorized);
    let shares = AllocationUtil::percentages(&weights, SHARE_DECIMAL_PLACES);

    rows.into_iter()
        .zip(shares)
        .map(|((info, base, count), percentage)| CategoryStat {
            id: info.id,
            name: info.name.clone(),
            icon: info.icon.clone(),
            color: info.color.clone(),
            total: to_display(base, display_currency),
            count,
            percentage,
        })
        .collect()
}

/// Returns up to `limit` records, newest first by date then creation time.
#[must_use]
pub fn recent_transactions(
    records: &[TransactionRecord],
    categories: &[CategoryInfo],
    limit: usize,
    display_currency: Currency,
) -> Vec<RecentTransaction> {
    let lookup: HashMap<CategoryId, &CategoryInfo> =
        categories.iter().map(|c| (c.id, c)).collect();

    let mut sorted: Vec<&TransactionRecord> = records.iter().collect();
    sorted.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });

    sorted
        .into_iter()
        .take(limit)
        .map(|record| {
            let category = record.category_id.and_then(|id| lookup.get(&id));
            RecentTransaction {
                id: record.id,
                kind: record.kind,
                amount: CurrencyService::convert(record.amount, record.currency, display_currency),
                currency: display_currency,
                original_amount: record.amount,
                original_currency: record.currency,
                category_name: category.map(|c| c.name.clone()),
                category_icon: category.map_or_else(|| DEFAULT_ICON.to_string(), |c| c.icon.clone()),
                date: record.date,
                description: record.description.clone(),
            }
        })
        .collect()
}

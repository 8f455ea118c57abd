//! Property-based tests for dashboard aggregation.

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use hamyon_shared::Currency;
use hamyon_shared::types::{CategoryId, TransactionId};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::aggregate::{category_breakdown, daily_series, summarize};
use crate::category::{CategoryInfo, DEFAULT_COLOR, DEFAULT_ICON};
use crate::period::{ChartPeriod, DateWindow};
use crate::transaction::{TransactionKind, TransactionRecord};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 30).unwrap_or_default()
}

fn any_currency() -> impl Strategy<Value = Currency> {
    prop::sample::select(Currency::ALL.to_vec())
}

fn any_kind() -> impl Strategy<Value = TransactionKind> {
    prop::sample::select(vec![TransactionKind::Income, TransactionKind::Expense])
}

fn any_chart_period() -> impl Strategy<Value = ChartPeriod> {
    prop::sample::select(vec![
        ChartPeriod::Week,
        ChartPeriod::Month,
        ChartPeriod::Quarter,
        ChartPeriod::Year,
    ])
}

fn categories() -> Vec<CategoryInfo> {
    (0..4)
        .map(|i| CategoryInfo {
            id: CategoryId::from_uuid(uuid::Uuid::from_u128(i + 1)),
            name: format!("Category {i}"),
            icon: DEFAULT_ICON.to_string(),
            color: DEFAULT_COLOR.to_string(),
            kind: TransactionKind::Expense,
            owner: None,
        })
        .collect()
}

/// Records spread over the last 400 days; category index 4 means none.
fn records() -> impl Strategy<Value = Vec<TransactionRecord>> {
    let cats = categories();
    prop::collection::vec(
        (
            any_kind(),
            1i64..100_000_000i64,
            any_currency(),
            0i64..400,
            0usize..5,
        ),
        0..40,
    )
    .prop_map(move |rows| {
        rows.into_iter()
            .map(|(kind, cents, currency, days_ago, cat)| {
                let date = today() - Duration::days(days_ago);
                TransactionRecord {
                    id: TransactionId::new(),
                    kind,
                    amount: Decimal::new(cents, 2),
                    currency,
                    category_id: cats.get(cat).map(|c| c.id),
                    date,
                    description: String::new(),
                    created_at: Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).unwrap_or_default()),
                }
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// The balance always equals income minus expense as returned.
    #[test]
    fn prop_balance_is_income_minus_expense(
        records in records(),
        currency in any_currency(),
        period in any_chart_period(),
    ) {
        let summary = summarize(&records, &period.window(today()), currency);
        prop_assert_eq!(
            summary.current_balance,
            summary.total_income - summary.total_expense
        );
        prop_assert!(summary.total_income >= Decimal::ZERO);
        prop_assert!(summary.total_expense >= Decimal::ZERO);
    }

    /// One zero-filled bucket per day of the period.
    #[test]
    fn prop_chart_length_matches_period(
        records in records(),
        currency in any_currency(),
        period in any_chart_period(),
    ) {
        let window = period.window(today());
        let chart = daily_series(&records, &window, currency);
        let days = usize::try_from(period.days()).unwrap_or_default();
        prop_assert_eq!(chart.labels.len(), days);
        prop_assert_eq!(chart.income_data.len(), days);
        prop_assert_eq!(chart.expense_data.len(), days);
    }

    /// Category shares never exceed 100 in total.
    #[test]
    fn prop_category_percentages_at_most_100(
        records in records(),
        currency in any_currency(),
    ) {
        let window = DateWindow::ending_on(today(), 365);
        let stats = category_breakdown(
            &records,
            &categories(),
            &window,
            TransactionKind::Expense,
            currency,
        );
        let sum: Decimal = stats.iter().map(|s| s.percentage).sum();
        prop_assert!(sum <= Decimal::ONE_HUNDRED);
        prop_assert!(stats.windows(2).all(|w| w[0].total >= w[1].total));
    }

    /// Fully categorized input yields shares summing to exactly 100.
    #[test]
    fn prop_category_percentages_exactly_100_when_categorized(
        mut records in records(),
        currency in any_currency(),
    ) {
        let cats = categories();
        for (i, record) in records.iter_mut().enumerate() {
            record.kind = TransactionKind::Expense;
            record.category_id = Some(cats[i % cats.len()].id);
        }
        prop_assume!(!records.is_empty());

        let window = DateWindow::ending_on(today(), 400);
        let stats = category_breakdown(&records, &cats, &window, TransactionKind::Expense, currency);
        let sum: Decimal = stats.iter().map(|s| s.percentage).sum();
        prop_assert_eq!(sum, Decimal::ONE_HUNDRED);
    }
}

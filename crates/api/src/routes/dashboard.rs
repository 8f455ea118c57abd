//! Dashboard routes: summary, daily chart series and category statistics.
//!
//! Each handler loads the caller's transactions once and hands them to the
//! pure aggregation functions in `hamyon_core::dashboard`. Chart and category
//! statistics only load rows inside the requested window; the summary needs
//! every row for its all-time totals.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::Deserialize;
use tracing::debug;

use super::parse_kind;
use crate::{AppState, error::ApiResult, middleware::AuthUser};
use hamyon_core::currency::parse_currency;
use hamyon_core::dashboard::{
    CategoryStat, ChartData, DashboardSummary, category_breakdown, daily_series,
    recent_transactions, summarize,
};
use hamyon_core::period::{ChartPeriod, StatsPeriod};
use hamyon_core::transaction::TransactionKind;
use hamyon_db::DashboardRepository;

/// Creates the dashboard routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard/summary/", get(get_summary))
        .route("/dashboard/chart-data/", get(get_chart_data))
        .route("/dashboard/category-stats/", get(get_category_stats))
}

// ============================================================================
// Query Parameters
// ============================================================================

/// Query parameters for the summary and chart endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    /// Display currency code; defaults to UZS.
    pub currency: Option<String>,
    /// Period length in days: 7, 30, 90 or 365; defaults to 30.
    pub period: Option<String>,
}

/// Query parameters for category statistics.
#[derive(Debug, Default, Deserialize)]
pub struct CategoryStatsQuery {
    /// Display currency code; defaults to UZS.
    pub currency: Option<String>,
    /// `week`, `month` or `year`; defaults to month.
    pub period: Option<String>,
    /// `expense` (default) or `income`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/dashboard/summary/`
async fn get_summary(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
    auth: AuthUser,
) -> ApiResult<Json<DashboardSummary>> {
    let currency = parse_currency(query.currency.as_deref())?;
    let period = ChartPeriod::parse_or_default(query.period.as_deref())?;

    let repo = DashboardRepository::new((*state.db).clone());
    let owner_id = auth.user_id();
    let records = repo.load_records(owner_id).await?;
    let categories = repo.load_categories(owner_id).await?;

    debug!(user_id = %owner_id, %currency, %period, records = records.len(), "building summary");

    let window = period.window(state.today());
    let recent = recent_transactions(&records, &categories, state.recent_limit, currency);
    Ok(Json(summarize(&records, &window, currency).with_recent(recent)))
}

/// GET `/dashboard/chart-data/`
async fn get_chart_data(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
    auth: AuthUser,
) -> ApiResult<Json<ChartData>> {
    let currency = parse_currency(query.currency.as_deref())?;
    let period = ChartPeriod::parse_or_default(query.period.as_deref())?;

    let window = period.window(state.today());
    let records = DashboardRepository::new((*state.db).clone())
        .load_records_in(auth.user_id(), &window)
        .await?;

    Ok(Json(daily_series(&records, &window, currency)))
}

/// GET `/dashboard/category-stats/`
async fn get_category_stats(
    State(state): State<AppState>,
    Query(query): Query<CategoryStatsQuery>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<CategoryStat>>> {
    let currency = parse_currency(query.currency.as_deref())?;
    let period = StatsPeriod::parse_or_default(query.period.as_deref())?;
    let kind = parse_kind(query.kind.as_deref())?.unwrap_or(TransactionKind::Expense);

    let repo = DashboardRepository::new((*state.db).clone());
    let owner_id = auth.user_id();
    let window = period.window(state.today());
    let records = repo.load_records_in(owner_id, &window).await?;
    let categories = repo.load_categories(owner_id).await?;

    Ok(Json(category_breakdown(
        &records,
        &categories,
        &window,
        kind,
        currency,
    )))
}

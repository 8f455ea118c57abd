//! Transaction management routes.
//!
//! All handlers are scoped to the authenticated user; another user's
//! transaction IDs answer 404.

use std::collections::HashMap;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::info;
use uuid::Uuid;

use super::parse_kind;
use crate::{
    AppState,
    error::{ApiError, ApiResult},
    middleware::AuthUser,
};
use hamyon_core::category::CategoryInfo;
use hamyon_core::currency::{CurrencyError, parse_currency};
use hamyon_core::transaction::{TransactionKind, TransactionRecord};
use hamyon_db::repositories::{
    CategoryRepository, CreateTransactionInput, TransactionFilter, TransactionRepository,
    UpdateTransactionInput,
};
use hamyon_shared::Currency;
use hamyon_shared::types::{CategoryId, PageRequest, PageResponse};

/// Creates the transaction routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/transactions/",
            get(list_transactions).post(create_transaction),
        )
        .route(
            "/transactions/{transaction_id}/",
            get(get_transaction)
                .patch(update_transaction)
                .delete(delete_transaction),
        )
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for listing transactions.
#[derive(Debug, Deserialize)]
pub struct ListTransactionsQuery {
    /// Filter by kind.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Filter by date range start (YYYY-MM-DD).
    pub from: Option<String>,
    /// Filter by date range end (YYYY-MM-DD).
    pub to: Option<String>,
    /// Filter by recorded currency.
    pub currency: Option<String>,
    /// Filter by category ID.
    pub category: Option<String>,
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Page size (default: 20, max: 100).
    pub per_page: Option<u32>,
}

/// Request body for creating a transaction.
#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
    /// `income` or `expense`.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Positive amount.
    pub amount: Decimal,
    /// Currency code; defaults to UZS.
    pub currency: Option<String>,
    /// Optional category.
    pub category_id: Option<Uuid>,
    /// Date; defaults to today.
    pub date: Option<NaiveDate>,
    /// Description.
    #[serde(default)]
    pub description: String,
}

/// Request body for editing a transaction. Absent fields stay unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdateTransactionRequest {
    /// New kind.
    #[serde(rename = "type")]
    pub kind: Option<TransactionKind>,
    /// New amount.
    pub amount: Option<Decimal>,
    /// New currency code.
    pub currency: Option<String>,
    /// New category; `null` clears it.
    #[serde(default, deserialize_with = "present")]
    pub category_id: Option<Option<Uuid>>,
    /// New date.
    pub date: Option<NaiveDate>,
    /// New description.
    pub description: Option<String>,
}

/// Maps a present field (including `null`) to `Some`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Response for a transaction.
#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    /// Transaction ID.
    pub id: Uuid,
    /// `income` or `expense`.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Amount in `currency`.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// Recorded currency.
    pub currency: Currency,
    /// Category ID.
    pub category_id: Option<Uuid>,
    /// Category name.
    pub category_name: Option<String>,
    /// Category icon.
    pub category_icon: Option<String>,
    /// Date.
    pub date: NaiveDate,
    /// Description.
    pub description: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl TransactionResponse {
    fn new(record: TransactionRecord, categories: &HashMap<CategoryId, CategoryInfo>) -> Self {
        let category = record.category_id.and_then(|id| categories.get(&id));
        Self {
            id: record.id.into_inner(),
            kind: record.kind,
            amount: record.amount,
            currency: record.currency,
            category_id: record.category_id.map(CategoryId::into_inner),
            category_name: category.map(|c| c.name.clone()),
            category_icon: category.map(|c| c.icon.clone()),
            date: record.date,
            description: record.description,
            created_at: record.created_at,
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn parse_date(field: &str, value: Option<&str>) -> ApiResult<Option<NaiveDate>> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| {
            NaiveDate::parse_from_str(v, "%Y-%m-%d")
                .map_err(|_| ApiError::validation(format!("Invalid {field} date: {v}. Expected YYYY-MM-DD")))
        })
        .transpose()
}

fn parse_optional_currency(value: Option<&str>) -> Result<Option<Currency>, CurrencyError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| v.parse::<Currency>().map_err(CurrencyError::from))
        .transpose()
}

async fn category_lookup(
    state: &AppState,
    owner_id: Uuid,
) -> ApiResult<HashMap<CategoryId, CategoryInfo>> {
    let categories = CategoryRepository::new((*state.db).clone())
        .list_visible(owner_id, None)
        .await?;
    Ok(categories.into_iter().map(|c| (c.id, c)).collect())
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET `/transactions/` - Paginated list, newest first.
async fn list_transactions(
    State(state): State<AppState>,
    Query(query): Query<ListTransactionsQuery>,
    auth: AuthUser,
) -> ApiResult<impl IntoResponse> {
    let category_id = query
        .category
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| {
            v.parse::<Uuid>()
                .map_err(|_| ApiError::validation(format!("Invalid category: {v}")))
        })
        .transpose()?;

    let filter = TransactionFilter {
        kind: parse_kind(query.kind.as_deref())?,
        date_from: parse_date("from", query.from.as_deref())?,
        date_to: parse_date("to", query.to.as_deref())?,
        currency: parse_optional_currency(query.currency.as_deref())?,
        category_id,
    };

    let defaults = PageRequest::default();
    let page = PageRequest {
        page: query.page.unwrap_or(defaults.page),
        per_page: query.per_page.unwrap_or(defaults.per_page),
    }
    .normalized();

    let owner_id = auth.user_id();
    let (records, total) = TransactionRepository::new((*state.db).clone())
        .list(owner_id, &filter, &page)
        .await?;
    let categories = category_lookup(&state, owner_id).await?;

    let data = records
        .into_iter()
        .map(|r| TransactionResponse::new(r, &categories))
        .collect();

    Ok(Json(PageResponse::new(data, page.page, page.per_page, total)))
}

/// POST `/transactions/` - Record a transaction.
async fn create_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateTransactionRequest>,
) -> ApiResult<impl IntoResponse> {
    let owner_id = auth.user_id();
    let input = CreateTransactionInput {
        owner_id,
        kind: payload.kind,
        amount: payload.amount,
        currency: parse_currency(payload.currency.as_deref())?,
        category_id: payload.category_id,
        date: payload.date.unwrap_or_else(|| state.today()),
        description: payload.description.trim().to_string(),
    };

    let record = TransactionRepository::new((*state.db).clone())
        .create(input)
        .await?;
    info!(transaction_id = %record.id, user_id = %owner_id, "Transaction created");

    let categories = category_lookup(&state, owner_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(TransactionResponse::new(record, &categories)),
    ))
}

/// GET `/transactions/{id}/` - Fetch one transaction.
async fn get_transaction(
    State(state): State<AppState>,
    Path(transaction_id): Path<Uuid>,
    auth: AuthUser,
) -> ApiResult<impl IntoResponse> {
    let owner_id = auth.user_id();
    let record = TransactionRepository::new((*state.db).clone())
        .find(owner_id, transaction_id)
        .await?;
    let categories = category_lookup(&state, owner_id).await?;

    Ok(Json(TransactionResponse::new(record, &categories)))
}

/// PATCH `/transactions/{id}/` - Edit a transaction.
async fn update_transaction(
    State(state): State<AppState>,
    Path(transaction_id): Path<Uuid>,
    auth: AuthUser,
    Json(payload): Json<UpdateTransactionRequest>,
) -> ApiResult<impl IntoResponse> {
    let owner_id = auth.user_id();
    let input = UpdateTransactionInput {
        kind: payload.kind,
        amount: payload.amount,
        currency: parse_optional_currency(payload.currency.as_deref())?,
        category_id: payload.category_id,
        date: payload.date,
        description: payload.description.map(|d| d.trim().to_string()),
    };

    let record = TransactionRepository::new((*state.db).clone())
        .update(owner_id, transaction_id, input)
        .await?;
    info!(transaction_id = %transaction_id, user_id = %owner_id, "Transaction updated");

    let categories = category_lookup(&state, owner_id).await?;
    Ok(Json(TransactionResponse::new(record, &categories)))
}

/// DELETE `/transactions/{id}/` - Delete a transaction.
async fn delete_transaction(
    State(state): State<AppState>,
    Path(transaction_id): Path<Uuid>,
    auth: AuthUser,
) -> ApiResult<impl IntoResponse> {
    TransactionRepository::new((*state.db).clone())
        .delete(auth.user_id(), transaction_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

//! Category routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get},
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use super::parse_kind;
use crate::{AppState, error::ApiResult, middleware::AuthUser};
use hamyon_core::category::{CategoryInfo, normalize_color, normalize_icon, normalize_name};
use hamyon_core::transaction::TransactionKind;
use hamyon_db::repositories::{CategoryRepository, CreateCategoryInput};

/// Creates the category routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/categories/", get(list_categories).post(create_category))
        .route("/categories/{category_id}/", delete(delete_category))
}

/// Query parameters for listing categories.
#[derive(Debug, Deserialize)]
pub struct ListCategoriesQuery {
    /// `income` or `expense`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// Request body for creating a category.
#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    /// Display name.
    pub name: String,
    /// `income` or `expense`.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Icon class.
    pub icon: Option<String>,
    /// Hex color.
    pub color: Option<String>,
}

/// Response for a category.
#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    /// Category ID.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Icon class.
    pub icon: String,
    /// Hex color.
    pub color: String,
    /// `income` or `expense`.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// True for the shared default categories.
    pub is_default: bool,
}

impl From<CategoryInfo> for CategoryResponse {
    fn from(info: CategoryInfo) -> Self {
        Self {
            is_default: info.is_shared(),
            id: info.id.into_inner(),
            name: info.name,
            icon: info.icon,
            color: info.color,
            kind: info.kind,
        }
    }
}

/// GET `/categories/` - Own and shared categories.
async fn list_categories(
    State(state): State<AppState>,
    Query(query): Query<ListCategoriesQuery>,
    auth: AuthUser,
) -> ApiResult<impl IntoResponse> {
    let kind = parse_kind(query.kind.as_deref())?;
    let categories = CategoryRepository::new((*state.db).clone())
        .list_visible(auth.user_id(), kind)
        .await?;

    let response: Vec<CategoryResponse> = categories.into_iter().map(Into::into).collect();
    Ok(Json(response))
}

/// POST `/categories/` - Create an owned category.
async fn create_category(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateCategoryRequest>,
) -> ApiResult<impl IntoResponse> {
    let input = CreateCategoryInput {
        owner_id: Some(auth.user_id()),
        name: normalize_name(&payload.name)?,
        icon: normalize_icon(payload.icon.as_deref()),
        color: normalize_color(payload.color.as_deref())?,
        kind: payload.kind,
    };

    let category = CategoryRepository::new((*state.db).clone())
        .create(input)
        .await?;

    info!(category_id = %category.id, user_id = %auth.user_id(), "Category created");
    Ok((StatusCode::CREATED, Json(CategoryResponse::from(category))))
}

/// DELETE `/categories/{id}/` - Delete an owned category.
async fn delete_category(
    State(state): State<AppState>,
    Path(category_id): Path<Uuid>,
    auth: AuthUser,
) -> ApiResult<impl IntoResponse> {
    CategoryRepository::new((*state.db).clone())
        .delete(auth.user_id(), category_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

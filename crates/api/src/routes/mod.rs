//! API route definitions.

use axum::{Router, middleware};

use crate::{AppState, middleware::auth_middleware};

pub mod auth;
pub mod categories;
pub mod currencies;
pub mod dashboard;
pub mod health;
pub mod transactions;

/// Creates the API router: public routes plus the authenticated ones.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    let protected_routes = Router::new()
        .merge(currencies::routes())
        .merge(categories::routes())
        .merge(transactions::routes())
        .merge(dashboard::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(health::routes())
        .merge(auth::routes())
        .merge(protected_routes)
}

/// Parses an optional `type` query value; blank means no filter.
pub(crate) fn parse_kind(
    value: Option<&str>,
) -> Result<Option<hamyon_core::transaction::TransactionKind>, hamyon_core::transaction::TransactionError>
{
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::parse)
        .transpose()
}

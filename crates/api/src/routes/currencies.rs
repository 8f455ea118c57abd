//! Currency listing routes.

use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::{AppState, middleware::AuthUser};
use hamyon_core::currency::{BASE_CURRENCY, CurrencyRate, rate_table};
use hamyon_shared::Currency;

/// Creates the currency routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/currencies/", get(list_currencies))
}

/// Response for the currency listing.
#[derive(Debug, Serialize)]
pub struct CurrenciesResponse {
    /// Currency all rates are quoted against.
    pub base: Currency,
    /// One entry per supported currency.
    pub currencies: Vec<CurrencyRate>,
}

/// GET `/currencies/` - Supported currencies with their fixed rates.
async fn list_currencies(_auth: AuthUser) -> Json<CurrenciesResponse> {
    Json(CurrenciesResponse {
        base: BASE_CURRENCY,
        currencies: rate_table(),
    })
}

//! HTTP handlers for rate table lookups.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::dto::ErrorResponse;
use crate::domain::foundation::ErrorCode;
use crate::domain::pricing::scope_options;
use crate::ports::RateTableProvider;

#[derive(Clone)]
pub struct PricingAppState {
    rates: Arc<dyn RateTableProvider>,
}

impl PricingAppState {
    pub fn new(rates: Arc<dyn RateTableProvider>) -> Self {
        Self { rates }
    }
}

/// GET /api/pricing/tables - Active rate table
pub async fn get_tables(State(state): State<PricingAppState>) -> Response {
    match state.rates.tables() {
        Ok(tables) => (StatusCode::OK, Json(tables.as_ref().clone())).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Rate table unavailable");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(
                    ErrorCode::ConfigurationError.to_string(),
                    e.to_string(),
                )),
            )
                .into_response()
        }
    }
}

/// GET /api/pricing/scope-options - Scopes each discipline offers
pub async fn get_scope_options() -> Response {
    (StatusCode::OK, Json(scope_options())).into_response()
}

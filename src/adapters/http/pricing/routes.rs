//! Axum router for pricing endpoints.

use axum::{routing::get, Router};

use super::handlers::{get_scope_options, get_tables, PricingAppState};

/// Pricing routes, mounted at `/api/pricing`.
pub fn pricing_routes() -> Router<PricingAppState> {
    Router::new()
        .route("/tables", get(get_tables))
        .route("/scope-options", get(get_scope_options))
}

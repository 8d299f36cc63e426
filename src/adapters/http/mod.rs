//! HTTP adapters - REST API implementations.
//!
//! Each module exposes a router over its own state; `api_router` mounts them
//! under `/api` behind the auth middleware.

pub mod dto;
pub mod middleware;
pub mod pricing;
pub mod proposal;

use axum::{middleware::from_fn_with_state, routing::get, Json, Router};
use serde_json::{json, Value};

pub use dto::ErrorResponse;
pub use middleware::{auth_middleware, AuthState, RequireAuth};
pub use pricing::{pricing_routes, PricingAppState};
pub use proposal::{proposal_routes, ProposalAppState};

/// GET /health
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }))
}

/// Complete API router with every endpoint mounted.
pub fn api_router(proposals: ProposalAppState, pricing: PricingAppState, auth: AuthState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/proposals", proposal_routes().with_state(proposals))
        .nest("/api/pricing", pricing_routes().with_state(pricing))
        .layer(from_fn_with_state(auth, auth_middleware))
}

//! HTTP adapter for rate table endpoints.

mod handlers;
mod routes;

pub use handlers::PricingAppState;
pub use routes::pricing_routes;

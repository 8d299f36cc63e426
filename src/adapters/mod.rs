//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `auth` - Bearer token validation (OIDC/JWKS, in-process mock)
//! - `document` - Markdown rendering, HTML/PDF conversion
//! - `http` - axum REST API
//! - `postgres` - PostgreSQL proposal repository
//! - `rates` - Rate table providers (built-in, JSON/YAML file)
//! - `storage` - In-memory proposal repository

pub mod auth;
pub mod document;
pub mod http;
pub mod postgres;
pub mod rates;
pub mod storage;

//! Process start-up: tracing, dependency wiring and the HTTP stack.

use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue};
use axum::Router;
use thiserror::Error;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::adapters::auth::{MockSessionValidator, OidcConfig, OidcSessionValidator};
use crate::adapters::document::{PulldownExportService, TemplateProposalRenderer};
use crate::adapters::http::{api_router, AuthState, PricingAppState, ProposalAppState};
use crate::adapters::postgres::PostgresProposalRepository;
use crate::adapters::rates::{FileRateTableProvider, StaticRateTableProvider};
use crate::adapters::storage::InMemoryProposalRepository;
use crate::application::{
    CalculateProposalHandler, ExportProposalHandler, GetProposalHandler, ListProposalsHandler,
    SaveProposalHandler,
};
use crate::config::{AppConfig, AuthConfig, ConfigError, DatabaseConfig, PricingConfig, ServerConfig};
use crate::domain::foundation::{AuthError, UserId, ValidationError};
use crate::ports::{ProposalRepository, RateTableError, RateTableProvider};

const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] crate::config::ValidationError),

    #[error(transparent)]
    RateTable(#[from] RateTableError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Invalid development user: {0}")]
    DevUser(#[from] ValidationError),

    #[error("Database connection failed: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Installs the global subscriber. JSON lines in production, human-readable otherwise.
///
/// `RUST_LOG` takes precedence over `server.log_level`.
pub fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if server.is_production() {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}

/// Builds the rate table provider: a file table when configured, otherwise
/// the built-in rates, then the engagement fee override if any.
pub fn rate_table_provider(config: &PricingConfig) -> Result<Arc<dyn RateTableProvider>, StartupError> {
    let tables = match &config.rate_table_path {
        Some(path) => FileRateTableProvider::load(path)?.tables()?,
        None => StaticRateTableProvider::defaults().tables()?,
    };

    let mut tables = (*tables).clone();
    if let Some(fee) = config.engagement_activation_fee {
        tracing::info!(fee, "Overriding engagement activation fee");
        tables.engagement_activation_fee = fee;
    }

    Ok(Arc::new(StaticRateTableProvider::new(tables)?))
}

/// OIDC validation when an issuer is configured, otherwise the development token.
pub fn session_validator(config: &AuthConfig) -> Result<AuthState, StartupError> {
    if config.uses_issuer() {
        let oidc = OidcConfig::new(&config.issuer_url, &config.audience)
            .with_cache_duration(config.jwks_cache_ttl());
        return Ok(Arc::new(OidcSessionValidator::new(oidc)?));
    }

    let mut validator = MockSessionValidator::new();
    match &config.dev_token {
        Some(token) => {
            tracing::warn!(user_id = %config.dev_user_id, "No auth issuer configured; accepting development token");
            validator = validator.with_user_id(token.clone(), UserId::new(config.dev_user_id.clone())?);
        }
        None => {
            tracing::warn!("No auth issuer or development token configured; saved proposals are unavailable");
        }
    }
    Ok(Arc::new(validator))
}

/// PostgreSQL when configured, otherwise process memory.
pub async fn proposal_repository(
    config: Option<&DatabaseConfig>,
) -> Result<Arc<dyn ProposalRepository>, StartupError> {
    let Some(database) = config else {
        tracing::warn!("No database configured; saved proposals are kept in memory");
        return Ok(Arc::new(InMemoryProposalRepository::new()));
    };

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(database.max_connections)
        .acquire_timeout(database.acquire_timeout())
        .connect(&database.url)
        .await?;

    if database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");
    }

    Ok(Arc::new(PostgresProposalRepository::new(pool)))
}

/// Wires every adapter and handler and returns the complete router.
pub async fn build_app(config: &AppConfig) -> Result<Router, StartupError> {
    let rates = rate_table_provider(&config.pricing)?;
    let repository = proposal_repository(config.database.as_ref()).await?;
    let validator = session_validator(&config.auth)?;

    let exporter = Arc::new(
        PulldownExportService::new()
            .with_pandoc_path(&config.document.pandoc_path)
            .with_pdf_engine(&config.document.pdf_engine)
            .with_pdf_timeout(config.document.pdf_timeout_secs),
    );
    let renderer = Arc::new(TemplateProposalRenderer::new());

    let proposals = ProposalAppState::new(
        Arc::new(CalculateProposalHandler::new(rates.clone())),
        Arc::new(SaveProposalHandler::new(repository.clone(), rates.clone())),
        Arc::new(GetProposalHandler::new(repository.clone())),
        Arc::new(ListProposalsHandler::new(repository)),
        Arc::new(ExportProposalHandler::new(rates.clone(), renderer, exporter)),
    );
    let pricing = PricingAppState::new(rates);

    Ok(with_middleware(api_router(proposals, pricing, validator), &config.server))
}

fn with_middleware(router: Router, server: &ServerConfig) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    router
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(std::time::Duration::from_secs(
            server.request_timeout_secs,
        )))
        .layer(cors_layer(server))
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(AllowOrigin::list(origins))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_pricing_config_serves_builtin_rates() {
        let provider = rate_table_provider(&PricingConfig::default()).unwrap();
        assert_eq!(
            provider.tables().unwrap().engagement_activation_fee,
            26_800_000.0
        );
    }

    #[test]
    fn engagement_fee_override_applies_to_file_table() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        let json =
            serde_json::to_string(crate::domain::pricing::PricingTables::defaults()).unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let provider = rate_table_provider(&PricingConfig {
            rate_table_path: Some(file.path().display().to_string()),
            engagement_activation_fee: Some(30_000_000.0),
        })
        .unwrap();

        assert_eq!(
            provider.tables().unwrap().engagement_activation_fee,
            30_000_000.0
        );
    }

    #[tokio::test]
    async fn dev_token_authenticates_dev_user() {
        let validator = session_validator(&AuthConfig {
            dev_token: Some("local".to_string()),
            ..Default::default()
        })
        .unwrap();

        let user = validator.validate("local").await.unwrap();
        assert_eq!(user.id.as_str(), "dev-user");
    }

    #[tokio::test]
    async fn missing_database_config_uses_memory() {
        let repo = proposal_repository(None).await.unwrap();
        let user = UserId::new("user_1").unwrap();
        assert!(repo.list_by_user(&user).await.unwrap().is_empty());
    }
}

use fee_proposal::config::AppConfig;
use fee_proposal::startup::{build_app, init_tracing, StartupError};

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    let app = build_app(&config).await?;
    let addr = config.server.socket_addr()?;

    tracing::info!(
        %addr,
        environment = ?config.server.environment,
        database = config.database.is_some(),
        "Fee proposal service starting"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Fee proposal service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}

//! Binary entry point for the payroll engine HTTP server.
//!
//! Loads the deduction schedule from `PAYROLL_CONFIG_DIR` (default
//! `./config/rwanda`) and binds to `PORT` (default 8080).

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::ConfigLoader;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config_dir =
        std::env::var("PAYROLL_CONFIG_DIR").unwrap_or_else(|_| "./config/rwanda".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    let config = ConfigLoader::load(&config_dir).map_err(|e| {
        tracing::error!("Failed to load configuration from {config_dir}: {e}");
        e
    })?;
    tracing::info!(
        schedule = %config.schedule().metadata.code,
        version = %config.schedule().metadata.version,
        "Loaded deduction schedule"
    );

    let app = create_router(AppState::new(config));

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Payroll engine listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

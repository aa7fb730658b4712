use std::net::SocketAddr;

use anyhow::{Context, Result};
use planilla_engine::api::{AppState, create_router};
use planilla_engine::config::ConfigLoader;
use tracing::info;

const DEFAULT_CONFIG_DIR: &str = "./config/panama";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let config_dir =
        std::env::var("PLANILLA_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let config = ConfigLoader::load(&config_dir)
        .with_context(|| format!("loading configuration from {}", config_dir))?;
    info!(
        jurisdiction = %config.jurisdiction().code,
        version = %config.jurisdiction().version,
        parameters = config.parameters().len(),
        "Configuration loaded"
    );

    let addr: SocketAddr = std::env::var("PLANILLA_BIND_ADDR")
        .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
        .parse()
        .context("parsing PLANILLA_BIND_ADDR")?;

    let app = create_router(AppState::new(config));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!(%addr, "Payroll engine listening");

    axum::serve(listener, app).await?;
    Ok(())
}

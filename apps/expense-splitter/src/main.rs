//! Expense Splitter API - service skeleton
//!
//! Currently exposes the health endpoint and an empty expense list while
//! the expense domain is designed.

use axum_helpers::server::{create_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use tracing::info;

mod api;
mod config;
mod openapi;

use config::Config;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    let router = axum_helpers::create_router::<openapi::ApiDoc>(api::routes()).await?;
    let app = router.merge(health_router(config.app.clone()));

    info!("Starting Expense Splitter API on port {}", config.server.port);

    create_app(app, &config.server)
        .await
        .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Expense Splitter API shutdown complete");
    Ok(())
}

mod config;
mod db;
mod error;
mod geo;
mod models;
mod processor;
mod server;

use config::AppConfig;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load config
    let config = AppConfig::load()?;

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(&config.log_level)
        .init();

    info!("Starting Check-in Hub Service...");

    // Init DB
    let pool = db::init_pool(&config.database_url).await?;
    info!("Connected to database");

    db::run_migrations(&pool).await?;
    info!("Migrations applied");

    // Start HTTP server
    server::serve(config, pool).await?;

    Ok(())
}

//! Food Prices HTTP Server Binary
//!
//! This is the main entry point for the dashboard REST API server.
//! It loads the configuration, warms the dataset cache, sets up the HTTP
//! router, and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! FOOD_PRICES_DATA=data/wfp_food_prices_phl.csv cargo run --bin food-prices-server
//!
//! # With a configuration file
//! FOOD_PRICES_CONFIG=food-prices.toml cargo run --bin food-prices-server
//! ```
//!
//! # Environment Variables
//!
//! - `FOOD_PRICES_CONFIG`: TOML configuration file (optional)
//! - `FOOD_PRICES_DATA`: Dataset path (default: data/wfp_food_prices_phl.csv)
//! - `FOOD_PRICES_PREAMBLE_ROWS`: Rows before the header row (default: 1)
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `RUST_LOG`: Log filter (default: info)

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use food_prices::http::{create_router, AppState};
use food_prices::source::DatasetCache;
use food_prices::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging; `log` records from the library are forwarded too.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting food prices HTTP server");

    let config = AppConfig::from_env()?;
    let cache = Arc::new(DatasetCache::new(config.dataset_source()));
    info!("Dataset source: {}", cache.source_description());

    // Warm the cache; a failed load is retried on the next request.
    let warm = Arc::clone(&cache);
    match tokio::task::spawn_blocking(move || warm.get()).await? {
        Ok(dataset) => info!("Dataset ready with {} records", dataset.len()),
        Err(e) => warn!("Dataset not loaded yet: {}", e),
    }

    let app = create_router(AppState::new(cache));

    let addr: SocketAddr = config.bind_address().parse()?;
    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

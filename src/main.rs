mod access;
mod analytics;
mod api;
mod catalog;
mod config;
mod db;
mod error;
mod submission;
mod types;

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use crate::api::rate_limit::RateLimiter;
use crate::api::routes::{router, ApiState};
use crate::config::{Config, RATE_LIMIT_WINDOW_SECS};
use crate::db::PriceStore;
use crate::error::Result;

#[tokio::main]
async fn main() {
    let cfg = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {e}");
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cfg.log_level))
        .init();

    if let Err(e) = run(cfg).await {
        error!("Fatal error: {e}");
        std::process::exit(1);
    }
}

async fn run(cfg: Config) -> Result<()> {
    // --- Database setup ---
    let options = sqlx::sqlite::SqliteConnectOptions::new()
        .filename(&cfg.db_path)
        .create_if_missing(true);
    let pool = sqlx::SqlitePool::connect_with(options).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("Database ready at {}", cfg.db_path);

    let store = PriceStore::new(pool);
    let bind_addr = format!("0.0.0.0:{}", cfg.api_port);
    info!(
        auth_header = %cfg.auth_header,
        rate_limit = cfg.rate_limit_per_minute,
        cors_origins = cfg.cors_origins.len(),
        "Starting price service",
    );

    let api_state = ApiState::new(store, cfg);

    // Rate-limit table cleanup (background, every window)
    let limiter = Arc::clone(&api_state.limiter);
    tokio::spawn(async move { prune_rate_limits(limiter).await });

    // HTTP API server
    let app = router(api_state);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("HTTP API listening on {bind_addr}");

    axum::serve(listener, app).await?;

    Ok(())
}

async fn prune_rate_limits(limiter: Arc<RateLimiter>) {
    let mut interval = tokio::time::interval(Duration::from_secs(RATE_LIMIT_WINDOW_SECS));
    loop {
        interval.tick().await;
        limiter.prune(Instant::now());
        debug!(clients = limiter.tracked_clients(), "Pruned rate-limit windows");
    }
}

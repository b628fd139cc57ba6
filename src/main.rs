// SPDX-License-Identifier: MIT

//! PulmoScan backend server.
//!
//! Startup order matters: the model warm-up blocks readiness, and the
//! process must not begin serving if it fails.

use pulmoscan::{config::Config, db::Db, inference::ModelServer, AppState};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(model_path = %config.model_path, "Starting PulmoScan backend");

    // Initialize database
    let db = Db::connect(&config.database_url)
        .await
        .expect("Failed to initialize database");

    // Load the classifier and pay lazy-initialization costs up front.
    // A missing or malformed artifact is fatal: the process must not serve.
    let model = Arc::new(ModelServer::load(&config.model_path).expect("Failed to load model"));

    let state = Arc::new(AppState::build(config.clone(), db.clone(), model));

    // Periodic audit-log retention sweep, independent of request traffic.
    // The first tick fires immediately, giving an initial cleanup on startup.
    let sweep_audit = state.audit.clone();
    let retention = chrono::Duration::minutes(config.log_retention_minutes as i64);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(config.sweep_interval_secs));
        loop {
            ticker.tick().await;
            sweep_audit.sweep(retention).await;
        }
    });

    tracing::info!("Startup complete, ready to serve");

    // The route layer drives the services from here; keep the process alive
    // until it is asked to stop.
    tokio::signal::ctrl_c().await?;

    tracing::info!("Shutting down");
    db.close().await;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pulmoscan=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}

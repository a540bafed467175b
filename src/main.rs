mod config;
mod db;
mod error;
mod generation;
mod publisher;
mod scheduler;
mod server;

use crate::config::Config;
use crate::generation::LlmGenerator;
use crate::publisher::WordPressPublisher;
use crate::scheduler::{Executor, Generator, Publisher};
use anyhow::Result;
use chrono::FixedOffset;
use sea_orm_migration::MigratorTrait;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::{prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = Config::load()?;

    let log_level = config.log_level();
    let log_dir = &config.logging.dir;

    // Create log directory if it doesn't exist
    std::fs::create_dir_all(log_dir)?;

    // Setup file appender (daily rotation)
    let file_appender = tracing_appender::rolling::daily(log_dir, "autopress.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    // Use local time for log timestamps
    let local_timer = ChronoLocal::rfc_3339();

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_line_number(true)
        .with_file(true)
        .with_target(false)
        .with_timer(local_timer.clone());

    let file_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_timer(local_timer)
        .with_writer(non_blocking);

    let filter_layer = EnvFilter::from_default_env()
        .add_directive(log_level.into())
        .add_directive("sqlx=warn".parse().unwrap())
        .add_directive("sea_orm=warn".parse().unwrap());

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    info!("Starting autopress...");
    info!("Logs are written to: {}", log_dir);

    // Connect to database and run migrations
    let db = db::establish_connection(&config.database.url).await?;
    migration::Migrator::up(&db, None).await?;
    info!("Database migrations completed");

    let repo = Arc::new(db::repo::Repo::new(db.clone()));
    repo.ping().await?;
    info!("Database ping successful");

    // Shared outbound HTTP client; every provider and WordPress call
    // inherits this timeout
    let http = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(
            config.scheduler.http_timeout_sec,
        ))
        .build()?;

    let generator: Arc<dyn Generator> = Arc::new(LlmGenerator::new(http.clone()));
    let publisher: Arc<dyn Publisher> = Arc::new(WordPressPublisher::new(http.clone()));

    let timezone = FixedOffset::east_opt(config.scheduler.utc_offset_hours * 3600)
        .ok_or_else(|| anyhow::anyhow!("Invalid utc_offset_hours"))?;

    let executor = Arc::new(Executor::new(
        repo.clone(),
        generator,
        publisher,
        config.scheduler.window_minutes,
        timezone,
    ));
    info!(
        "Executor initialized (window ±{} min, UTC offset {:+}h)",
        config.scheduler.window_minutes, config.scheduler.utc_offset_hours
    );

    let state = server::AppState {
        repo,
        executor,
        http,
    };

    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    info!("Listening on {}", config.server.bind);

    axum::serve(listener, server::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to listen for Ctrl+C");
    info!("Received Ctrl+C, shutting down...");
}

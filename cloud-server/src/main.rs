//! CredLens API Server
//!
//! HTTP front end for the reputation scoring engine.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     CREDLENS SERVER                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐   ┌──────────────┐   ┌────────────────────┐  │
//! │  │  API      │──▶│ SharedEngine │◀──│ RetrainScheduler   │  │
//! │  │  (Axum)   │   │ (hot swap)   │   │ (spawn_blocking)   │  │
//! │  └─────┬─────┘   └──────────────┘   └─────────┬──────────┘  │
//! │        └──────────────┬───────────────────────┘             │
//! │                       ▼                                     │
//! │                ┌─────────────┐      model.json / scaler.json│
//! │                │   SQLite    │                              │
//! │                └─────────────┘                              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! `credlens-server train` runs a single training pass and exits.

mod config;
mod db;
mod error;
mod handlers;
mod models;
mod retrain;

use std::net::SocketAddr;

use anyhow::Context;
use clap::{Parser, Subcommand};
use axum::{
    Router,
    routing::{get, post},
};
use credlens_core::{RiskEngine, SharedEngine, TrainerConfig};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use error::{AppError, AppResult};
use retrain::RetrainScheduler;

#[derive(Parser, Debug)]
#[command(name = "credlens-server")]
#[command(about = "CredLens reputation scoring API", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Serve the HTTP API (default if no subcommand)
    Serve,
    /// Train once from the stored records, write the artifacts and exit
    Train,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    // Initialize logging (JSON lines in production)
    let json_logs = config.is_production();
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "credlens_server=debug,credlens_core=info,tower_http=debug".into()))
        .with(json_logs.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json_logs).then(tracing_subscriber::fmt::layer))
        .init();

    // Initialize database pool
    let pool = db::create_pool(&config.database_url)
        .await
        .with_context(|| format!("Failed to open database {}", config.database_url))?;

    db::run_migrations(&pool)
        .await
        .context("Failed to run migrations")?;

    if let Some(Command::Train) = cli.command {
        return train_once(&pool, &config).await;
    }

    tracing::info!("{} server starting ({})", credlens_core::constants::APP_NAME, config.environment);
    tracing::info!("Database: {}", config.database_url);

    let engine = SharedEngine::new(RiskEngine::load(config.engine_config()));
    if !engine.current().model_loaded() {
        tracing::warn!(
            "No usable model at {}; serving fallback probability until a retrain succeeds",
            config.model_path.display()
        );
    }

    let retrain = RetrainScheduler::new(pool.clone(), config.clone(), TrainerConfig::default(), engine.clone());

    // Build application state
    let state = AppState {
        pool,
        config: config.clone(),
        engine,
        retrain,
    };

    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", config.host, config.port))?;
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// One training pass for `credlens-server train`
async fn train_once(pool: &sqlx::SqlitePool, config: &config::Config) -> anyhow::Result<()> {
    let report = retrain::train_from_store(pool, TrainerConfig::default(), config.artifact_paths())
        .await
        .context("Training failed")?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pool: sqlx::SqlitePool,
    pub config: config::Config,
    pub engine: SharedEngine,
    pub retrain: RetrainScheduler,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/api/analyze", post(handlers::analyze::analyze))
        .route("/api/businesses", get(handlers::businesses::list))
        .route("/api/business", post(handlers::businesses::create))
        .route("/api/retrain", post(handlers::retrain::trigger))
        .route("/api/status", get(handlers::status::get))
        .fallback(handlers::not_found)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}

use sqlx::sqlite::SqlitePool;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod db;
mod error;
mod feed;
mod models;
mod routes;
mod scoring;

use config::Config;
use db::SqliteTeamRepository;
use feed::FileReferenceData;
use routes::AppState;

#[tokio::main]
async fn main() {
    // Initialize tracing/logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting fantasy cricket api...");

    let config = Config::from_env().expect("Invalid configuration");

    // Create database connection pool
    let pool = SqlitePool::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    let teams = SqliteTeamRepository::new(pool);
    teams
        .init_schema()
        .await
        .expect("Failed to prepare teams table");

    tracing::info!("Database connection established.");

    let reference = FileReferenceData::new(&config.data_dir);
    tracing::info!("Reading match data from {}", config.data_dir.display());

    let app = routes::router(AppState::new(Arc::new(teams), Arc::new(reference)));

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .await
        .expect("Failed to start server.");
}

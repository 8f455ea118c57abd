//! Hamyon API Server
//!
//! Main entry point for the personal finance dashboard backend.

use std::{sync::Arc, time::Duration};

use anyhow::Context;
use sea_orm_migration::MigratorTrait;
use tokio::net::TcpListener;
use tower_http::timeout::TimeoutLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hamyon_api::{AppState, create_router};
use hamyon_db::{Migrator, connect_with};
use hamyon_shared::{AppConfig, JwtService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hamyon=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;
    let timezone = config
        .dashboard
        .tz()
        .map_err(anyhow::Error::msg)?;

    let db = connect_with(&config.database).await?;
    info!("Connected to database");

    Migrator::up(&db, None).await?;
    info!("Migrations applied");

    let state = AppState {
        db: Arc::new(db),
        jwt_service: Arc::new(JwtService::new(&config.jwt)),
        timezone,
        recent_limit: config.dashboard.recent_limit,
    };

    let app = create_router(state).layer(TimeoutLayer::new(Duration::from_secs(
        config.server.request_timeout_secs,
    )));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, timezone = %timezone, "Server listening");

    axum::serve(listener, app).await?;

    Ok(())
}

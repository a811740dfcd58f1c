// Main entry point for the account API server

use std::sync::Arc;

use account_core::{
    domains::accounts::{AccountService, JwtService},
    kernel::PostgresAccountStore,
    server::build_app,
    Config,
};
use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,account_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting account service");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(jwt = ?config.jwt, "Configuration loaded");
    if config.jwt.ttl_hours.is_none() {
        tracing::warn!("JWT_TTL_HOURS not set: issued tokens never expire");
    }

    // Connect to database
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    // Run migrations
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations complete");

    // Build application
    let store = Arc::new(PostgresAccountStore::new(pool));
    let jwt_service = Arc::new(JwtService::from_config(&config.jwt));
    let account_service = Arc::new(AccountService::new(store, jwt_service));
    let app = build_app(account_service, &config.allowed_origins);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

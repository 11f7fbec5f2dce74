//! MindBridge HTTP server
//!
//! Serves the mock directory API, the search pipeline, the blog and admin
//! endpoints, and the embedded site.

use std::sync::Arc;

use anyhow::{Context, Result};
use mindbridge_core::domains::auth::{bootstrap_admin, JwtService};
use mindbridge_core::kernel::{build_directory, LocalObjectStorage, ServerDeps};
use mindbridge_core::server::{build_app, AppOptions};
use mindbridge_core::Config;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,mindbridge_core=debug,sqlx=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_line_number(true),
        )
        .init();

    tracing::info!("Starting MindBridge server");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        backend = config.directory_backend.name(),
        database = config.database_url.is_some(),
        "Configuration loaded"
    );

    let directory = build_directory(&config.directory_backend)
        .context("Failed to build directory backend")?;
    let storage = Arc::new(LocalObjectStorage::new(
        config.upload_dir.clone(),
        &config.public_base_url,
    ));
    let jwt_service = Arc::new(JwtService::new(&config.jwt_secret, config.jwt_issuer.clone()));

    let deps = match &config.database_url {
        Some(database_url) => {
            tracing::info!("Connecting to database...");
            let pool = PgPoolOptions::new()
                .max_connections(10)
                .connect(database_url)
                .await
                .context("Failed to connect to database")?;
            tracing::info!("Database connected");

            tracing::info!("Running database migrations...");
            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to run migrations")?;
            tracing::info!("Migrations complete");

            ServerDeps::with_pool(pool, directory, storage, jwt_service)
        }
        None => {
            tracing::warn!("DATABASE_URL not set; posts, admins and signups are kept in memory");
            ServerDeps::in_memory(directory, storage, jwt_service)
        }
    };

    if let (Some(email), Some(password)) = (&config.admin_email, &config.admin_password) {
        bootstrap_admin(deps.accounts.as_ref(), email, password).await?;
    }

    let app = build_app(
        deps,
        AppOptions {
            allowed_origins: config.allowed_origins.clone(),
            upload_dir: config.upload_dir.clone(),
            secure_cookies: config.secure_cookies(),
        },
    );

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

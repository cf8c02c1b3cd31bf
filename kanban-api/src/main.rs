//! # Kanban API Server
//!
//! Multi-user kanban backend: accounts, boards shared with members, ordered
//! lists and cards with tags, comments, assignees and an activity trail.
//!
//! ## Usage
//!
//! ```bash
//! DATABASE_URL=postgres://localhost/kanban JWT_SECRET=... cargo run -p kanban-api
//! ```

use anyhow::Context;
use kanban_api::{
    app::{build_router, AppState},
    config::Config,
};
use kanban_shared::db::{migrations, pool};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "kanban_api=debug,kanban_shared=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Kanban API Server v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env().context("Failed to load configuration")?;

    if !config.api.production {
        migrations::ensure_database_exists(&config.database.url)
            .await
            .context("Failed to create development database")?;
    }

    let db = pool::create_pool(config.pool_config())
        .await
        .context("Failed to connect to database")?;

    migrations::run_migrations(&db)
        .await
        .context("Failed to run migrations")?;

    let bind_address = config.bind_address();
    let app = build_router(AppState::new(db.clone(), config));

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;

    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    pool::close_pool(db).await;
    tracing::info!("Shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received, draining connections...");
}

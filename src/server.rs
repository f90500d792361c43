//! HTTP server initialization and runtime setup.
//!
//! Handles the database pool, migrations, service wiring, and Axum server lifecycle.

use crate::application::services::LinkService;
use crate::config::Config;
use crate::infrastructure::persistence::{SqliteLinkRepository, pool};
use crate::routes::app_router;
use crate::state::{AdminGuard, AppState};

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - SQLite connection pool (file created if missing)
/// - Apply migrations
/// - Link service and admin guard
/// - Axum HTTP server with graceful shutdown on Ctrl+C
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let db = pool::connect(&config.database_url, config.pool_settings())
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    pool::migrate(&db)
        .await
        .context("Failed to apply migrations")?;
    tracing::info!("Migrations applied");

    let link_repository = Arc::new(SqliteLinkRepository::new(Arc::new(db.clone())));
    let link_service = Arc::new(LinkService::new(link_repository, config.site_url.clone()));

    let admin_guard = AdminGuard {
        password: config.admin_password.clone(),
        allowed_ips: config.allowed_ips.clone(),
        behind_proxy: config.behind_proxy,
    };
    if admin_guard.password.is_none() && admin_guard.allowed_ips.is_empty() {
        tracing::warn!("Admin API is unprotected: set ADMIN_PASSWORD and/or ALLOWED_IPS");
    }

    let state = AppState::new(link_service, admin_guard);
    let app = app_router(state, config.behind_proxy);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    db.close().await;
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => tracing::error!(error = %e, "Failed to listen for shutdown signal"),
    }
}

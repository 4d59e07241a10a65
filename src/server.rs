//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, migrations, the hash counter store, admin
//! bootstrap, and the Axum server lifecycle.

use crate::application::services::user_service::AdminBootstrap;
use crate::application::services::{AuthService, UrlService, UserService};
use crate::config::Config;
use crate::infrastructure::counter::{CounterStore, NullCounterStore, RedisCounterStore};
use crate::infrastructure::persistence::{PgAccountRepository, PgShortLinkRepository};
use crate::infrastructure::probe::HttpProbe;
use crate::routes::app_router;
use crate::state::AppState;
use crate::utils::hash_generator::HashGenerator;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Creates the connection pool from config.
pub async fn connect_pool(config: &Config) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")
}

/// Picks the counter store: Redis when configured and reachable, otherwise none.
async fn counter_store(config: &Config) -> Arc<dyn CounterStore> {
    let Some(redis_url) = &config.redis_url else {
        tracing::info!("Counter persistence disabled (no Redis configured)");
        return Arc::new(NullCounterStore::new());
    };

    match RedisCounterStore::connect(redis_url).await {
        Ok(store) => Arc::new(store),
        Err(e) => {
            tracing::warn!("Failed to connect to Redis: {}. Counter will not be persisted.", e);
            Arc::new(NullCounterStore::new())
        }
    }
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool and migrations
/// - Hash counter, restored from the counter store
/// - Services and the bootstrap admin account
/// - Axum HTTP server with graceful shutdown
///
/// After the server drains, the counter is saved back to the store.
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - The admin account cannot be created
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_pool(&config).await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations applied");

    let store = counter_store(&config).await;
    let initial_counter = match store.load().await {
        Ok(value) => value.unwrap_or(0),
        Err(e) => {
            tracing::warn!("Could not load hash counter: {}. Starting from 0.", e);
            0
        }
    };
    tracing::info!(counter = initial_counter, backend = store.backend(), "Hash counter restored");

    let pool = Arc::new(pool);
    let query_timeout = config.query_timeout();
    let accounts = Arc::new(PgAccountRepository::new(pool.clone(), query_timeout));
    let links = Arc::new(PgShortLinkRepository::new(pool.clone(), query_timeout));

    let (probe_connect_timeout, probe_timeout) = config.probe_timeouts();
    let probe = Arc::new(
        HttpProbe::new(probe_connect_timeout, probe_timeout)
            .context("Failed to build probe client")?,
    );

    let auth = Arc::new(AuthService::new(&config.secret_key));
    let user_service = Arc::new(UserService::new(accounts, auth.clone()));
    let url_service = Arc::new(UrlService::new(
        links,
        probe,
        Arc::new(HashGenerator::new(initial_counter)),
        config.admin_id,
        config.hash_max_attempts,
    ));

    user_service
        .ensure_admin(AdminBootstrap {
            id: config.admin_id,
            email: config.admin_email.clone(),
            password: config.admin_password.clone(),
        })
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bootstrap admin account: {e}"))?;

    let state = AppState::new(
        auth,
        user_service,
        url_service.clone(),
        config.public_base_url.clone(),
    );

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let counter = url_service.counter();
    match store.save(counter).await {
        Ok(()) => tracing::info!(counter, "Hash counter saved"),
        Err(e) => tracing::error!(counter, "Failed to save hash counter: {}", e),
    }

    pool.close().await;
    tracing::info!("Server stopped");

    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}

//! TeamDrive Server: per-team virtual filesystem backend.
//!
//! Main entry point that wires all crates together and starts the server.

use std::future::IntoFuture;
use std::sync::Arc;

use anyhow::Context;
use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, fmt};

use teamdrive_api::{AppState, build_router};
use teamdrive_core::config::{AppConfig, DatabaseProvider};
use teamdrive_database::repositories::{FileRepository, FolderRepository, UserRepository};
use teamdrive_database::{
    DatabasePool, FileRegistry, FolderDirectory, MemoryDatabase, UserDirectory,
};
use teamdrive_service::FolderService;
use teamdrive_storage::StorageManager;

#[tokio::main]
async fn main() {
    let env = std::env::var("TEAMDRIVE_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e:#}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Persistence backends selected by `database.provider`.
struct Backends {
    folders: Arc<dyn FolderDirectory>,
    files: Arc<dyn FileRegistry>,
    users: Arc<dyn UserDirectory>,
    pool: Option<DatabasePool>,
}

async fn connect_backends(config: &AppConfig) -> anyhow::Result<Backends> {
    match config.database.provider {
        DatabaseProvider::Memory => {
            tracing::warn!("Using the in-memory metadata store; data is lost on restart");
            let db = Arc::new(MemoryDatabase::new());
            Ok(Backends {
                folders: db.clone(),
                files: db.clone(),
                users: db,
                pool: None,
            })
        }
        DatabaseProvider::Postgres => {
            tracing::info!("Connecting to database...");
            let pool = DatabasePool::connect(&config.database)
                .await
                .context("Database connection failed")?;

            tracing::info!("Running database migrations...");
            teamdrive_database::migration::run_migrations(pool.pool())
                .await
                .context("Migration failed")?;

            Ok(Backends {
                folders: Arc::new(FolderRepository::new(pool.pool().clone())),
                files: Arc::new(FileRepository::new(pool.pool().clone())),
                users: Arc::new(UserRepository::new(pool.pool().clone())),
                pool: Some(pool),
            })
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> anyhow::Result<()> {
    tracing::info!("Starting TeamDrive v{}", env!("CARGO_PKG_VERSION"));

    let backends = connect_backends(&config).await?;

    tracing::info!(provider = ?config.storage.provider, "Initializing storage...");
    let storage = Arc::new(
        StorageManager::connect(&config.storage)
            .await
            .context("Storage init failed")?,
    );

    let folder_service = Arc::new(FolderService::new(
        Arc::clone(&backends.folders),
        Arc::clone(&backends.files),
        Arc::clone(&backends.users),
        Arc::clone(&storage),
        config.timeouts.clone(),
        config.storage.presign_ttl(),
    ));

    let config = Arc::new(config);
    let app = build_router(AppState::new(
        Arc::clone(&config),
        Arc::clone(&storage),
        folder_service,
    ));

    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!("TeamDrive server listening on {addr}");

    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, draining in-flight requests...");
        let _ = shutdown_tx.send(true);
    });

    let grace = config.server.shutdown_grace();
    tokio::select! {
        result = server.into_future() => result.context("Server error")?,
        _ = async {
            let _ = shutdown_rx.wait_for(|stopped| *stopped).await;
            tokio::time::sleep(grace).await;
        } => {
            tracing::warn!(grace_seconds = grace.as_secs(), "Shutdown grace period elapsed");
        }
    }

    if let Some(pool) = backends.pool {
        pool.close().await;
    }

    tracing::info!("TeamDrive server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {e}");
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
                tracing::error!("Failed to install SIGTERM handler: {e}");
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
}

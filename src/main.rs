//! Parking Admin server
//!
//! Serves the parking administration REST API.
//! Reads configuration from TOML file (~/.config/parking-admin/config.toml).

use std::sync::Arc;

use tracing::{error, info, warn};

use parking_admin::domain::RepositoryProvider;
use parking_admin::shared::shutdown::{run_with_timeout, ShutdownSignal};
use parking_admin::{
    create_api_router, default_config_path, init_database, run_migrations, AppConfig,
    DatabaseConfig, SeaOrmRepositoryProvider, CONFIG_PATH_ENV,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var(CONFIG_PATH_ENV)
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level)),
                )
                .init();
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    info!("Starting Parking Admin...");

    // ── Prometheus metrics recorder (must be installed before any metrics calls) ──
    let prometheus_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| format!("Failed to install Prometheus metrics recorder: {}", e))?;
    info!("Prometheus metrics recorder installed");

    // ── Database ───────────────────────────────────────────────
    let db_config = DatabaseConfig {
        url: app_cfg.database.connection_url(),
        ..Default::default()
    };
    let db = match init_database(&db_config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    if let Err(e) = run_migrations(&db).await {
        error!("Failed to run migrations: {}", e);
        return Err(e.into());
    }

    let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db.clone()));

    let shutdown = ShutdownSignal::new();
    shutdown.listen_for_os_signals();

    let api_router = create_api_router(repos, db.clone(), prometheus_handle);

    let api_addr = app_cfg.server.address();
    let listener = tokio::net::TcpListener::bind(&api_addr).await?;
    info!("REST API server listening on http://{}", api_addr);
    info!("Swagger UI available at http://{}/docs/", api_addr);

    let api_shutdown = shutdown.clone();
    let mut api_server = tokio::spawn(async move {
        axum::serve(listener, api_router)
            .with_graceful_shutdown(async move {
                api_shutdown.wait().await;
                info!("REST API server received shutdown signal");
            })
            .await
    });

    let timeout = app_cfg.server.shutdown_timeout;
    tokio::select! {
        result = &mut api_server => log_server_exit(result),
        _ = shutdown.wait() => {
            let drained = run_with_timeout(timeout, async {
                log_server_exit((&mut api_server).await);
            })
            .await;
            if !drained {
                warn!("Aborting requests still in flight");
                api_server.abort();
            }
        }
    }

    info!("Performing final cleanup...");
    let closed = run_with_timeout(timeout, async move {
        if let Err(e) = db.close().await {
            warn!("Error closing database connection: {}", e);
        } else {
            info!("Database connection closed");
        }
    })
    .await;
    if !closed {
        warn!("Database did not close in time");
    }

    info!("Parking Admin shutdown complete");
    Ok(())
}

fn log_server_exit(result: Result<std::io::Result<()>, tokio::task::JoinError>) {
    match result {
        Ok(Ok(())) => info!("REST API server stopped"),
        Ok(Err(e)) => error!("REST API server error: {}", e),
        Err(e) => error!("REST API server task panicked: {}", e),
    }
}

//!
//! Pre-booking queue service for charging electric fleet vehicles.
//! Reads configuration from TOML file (~/.config/fleetease-prebook/config.toml).

use std::sync::Arc;

use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use fleetease_prebook::application::booking::LockRegistry;
use fleetease_prebook::application::start_queue_sweeper_task;
use fleetease_prebook::config::AppConfig;
use fleetease_prebook::infrastructure::database::migrator::Migrator;
use fleetease_prebook::shared::shutdown::ShutdownCoordinator;
use fleetease_prebook::{
    create_api_router, default_config_path, init_database, BookingService, DatabaseConfig,
    QueueReconciler, SeaOrmRepositoryProvider,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("PREBOOK_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            // Initialize logging with configured level
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

    info!("Starting FleetEase Pre-Booking Service...");

    // ── Prometheus metrics recorder (must be installed before any metrics calls) ──
    let prometheus_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus metrics recorder");
    info!("📊 Prometheus metrics recorder installed");

    // ── Database ───────────────────────────────────────────────
    let db_config = DatabaseConfig {
        url: app_cfg.database.connection_url(),
    };
    info!("Database: {}", db_config.url);

    let db = match init_database(&db_config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    info!("Running database migrations...");
    if let Err(e) = Migrator::up(&db, None).await {
        error!("Failed to run migrations: {}", e);
        return Err(e.into());
    }
    info!("Migrations completed");

    // Initialize repository provider
    let repos: Arc<dyn fleetease_prebook::domain::RepositoryProvider> =
        Arc::new(SeaOrmRepositoryProvider::new(db.clone()));

    // ── Queue machinery ────────────────────────────────────────
    let location_locks = LockRegistry::shared();
    let reconciler = Arc::new(QueueReconciler::new(repos.clone(), location_locks.clone()));
    let booking_service = Arc::new(BookingService::new(
        repos.clone(),
        reconciler.clone(),
        location_locks,
    ));

    // Initialize shutdown coordinator
    let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
    let shutdown_signal = shutdown.signal();

    // Start listening for shutdown signals (SIGTERM, SIGINT)
    shutdown.start_signal_listener();

    // Start the stale-lock sweeper
    start_queue_sweeper_task(
        repos.clone(),
        reconciler,
        shutdown_signal.clone(),
        app_cfg.sweeper.check_interval_secs,
    );

    // Create REST API router
    let api_router = create_api_router(repos, booking_service, db.clone(), prometheus_handle);

    // Start REST API server with graceful shutdown
    let api_addr = format!("{}:{}", app_cfg.server.api_host, app_cfg.server.api_port);
    let listener = tokio::net::TcpListener::bind(&api_addr).await?;
    info!("REST API server listening on http://{}", api_addr);
    info!("Swagger UI available at http://{}/docs/", api_addr);

    let api_shutdown = shutdown_signal.clone();
    let api_server = axum::serve(listener, api_router).with_graceful_shutdown(async move {
        api_shutdown.wait().await;
        info!("🛑 REST API server received shutdown signal");
    });

    info!("🚀 Server started. Press Ctrl+C to shutdown gracefully.");

    if let Err(e) = api_server.await {
        error!("REST API server error: {}", e);
    }

    // Perform final cleanup
    info!("🧹 Performing final cleanup...");

    if let Err(e) = db.close().await {
        warn!("Error closing database connection: {}", e);
    } else {
        info!("✅ Database connection closed");
    }

    info!("👋 FleetEase Pre-Booking Service shutdown complete");
    Ok(())
}

//! TalentGate HR Platform
//!
//! Main application entry point

use tracing::{info, warn};

use TalentGate::{
    api::{build_router, AppState},
    config::Settings,
    database::{connection, DatabaseService},
    services::ServiceFactory,
    utils::logging,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging; the guard must stay alive for the file appender
    let _guard = logging::init_logging(&settings.logging)?;

    info!("Starting TalentGate HR platform...");

    // Initialize database connection
    info!("Connecting to database...");
    let db_config = connection::DatabaseConfig {
        url: settings.database.url.clone(),
        max_connections: settings.database.max_connections,
        min_connections: settings.database.min_connections,
        acquire_timeout: std::time::Duration::from_secs(30),
        idle_timeout: Some(std::time::Duration::from_secs(600)),
        max_lifetime: Some(std::time::Duration::from_secs(1800)),
    };
    let pool = connection::create_pool(&db_config).await?;

    // Run database migrations
    connection::run_migrations(&pool).await?;

    // Initialize repositories and services
    let database = DatabaseService::new(pool.clone());

    info!("Initializing services...");
    let services = ServiceFactory::new(database.clone(), settings.clone())?;

    let health = services.health_check().await;
    if !health.redis_healthy {
        warn!("Redis is not reachable; OTP sign-in will fail until it is");
    }
    if !health.sms_live {
        info!("SMS gateway in dry-run mode, codes are logged instead of sent");
    }

    // Seed demo data when enabled
    #[cfg(feature = "demo-data")]
    if settings.features.demo_data {
        info!("Seeding demo data...");
        TalentGate::demo_data::seed(&database).await?;
    }

    // Sweep stale state left over from downtime
    let swept = database.sweep_expired().await?;
    info!(swept = %swept, "Expiry sweep completed");

    // Build the application
    let state = AppState::new(settings.clone(), pool, database, services);
    let app = build_router(state);

    let bind_address = format!("{}:{}", settings.server.host, settings.server.port);
    info!("Listening on {}", bind_address);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("TalentGate has been shut down.");

    Ok(())
}

/// Resolve when a shutdown signal arrives
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => warn!(error = %e, "Failed to listen for shutdown signal"),
    }
}

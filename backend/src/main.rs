//! FloodWatch - Backend Server

use sqlx::postgres::PgPoolOptions;
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::{signal, sync::watch};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use floodwatch_backend::{
    create_app,
    external::{ResendClient, WeatherClient},
    store::{MemoryStore, PgRegistrationStore, RegistrationStore},
    AppState, Config,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    // Load configuration
    let config = Config::load()?;

    tracing::info!("Starting FloodWatch Server");
    tracing::info!("Environment: {}", config.environment);

    let store = connect_store(&config).await?;

    if config.weather.api_key.trim().is_empty() {
        tracing::warn!("Weather API key is not configured; monitoring passes will be rejected");
    }
    if config.email.api_key.trim().is_empty() {
        tracing::warn!("Email API key is not configured; emails will not be delivered");
    }

    let weather = Arc::new(WeatherClient::with_base_url(
        config.weather.api_key.clone(),
        config.weather.api_endpoint.clone(),
    ));
    let email = Arc::new(ResendClient::with_base_url(
        config.email.api_key.clone(),
        config.email.api_endpoint.clone(),
    ));

    // Create application state
    let state = AppState::new(config.clone(), store, weather, email);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let scheduler = (config.monitor.interval_seconds > 0).then(|| {
        tokio::spawn(
            state
                .monitor_service()
                .run_scheduled(config.monitor.interval_seconds, shutdown_rx),
        )
    });

    // Build application
    let app = create_app(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Stop the scheduler from the same signal
    let _ = shutdown_tx.send(true);
    if let Some(scheduler) = scheduler {
        scheduler.await?;
    }

    Ok(())
}

/// Resolve on Ctrl+C or, on unix, SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down..."),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down..."),
    }
}

/// Initialize tracing, with JSON output when FLOODWATCH_LOG_FORMAT=json
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "floodwatch_server=debug,floodwatch_backend=debug,tower_http=debug,sqlx=warn".into());

    let json = std::env::var("FLOODWATCH_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Pick the registration store: Postgres when a URL is set, memory otherwise
async fn connect_store(config: &Config) -> anyhow::Result<Arc<dyn RegistrationStore>> {
    if config.database.is_in_memory() {
        tracing::warn!("No database URL configured; registrations are kept in memory only");
        return Ok(Arc::new(MemoryStore::new()));
    }

    // Create database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .acquire_timeout(Duration::from_secs(30))
        .connect(&config.database.url)
        .await?;

    tracing::info!("Database connection established");

    // Run migrations in development
    if config.environment == "development" {
        tracing::info!("Running database migrations...");
        sqlx::migrate!("./migrations").run(&db_pool).await?;
        tracing::info!("Migrations completed");
    }

    Ok(Arc::new(PgRegistrationStore::new(db_pool)))
}

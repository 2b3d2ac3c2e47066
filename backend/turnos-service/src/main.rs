use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use turnos_service::config::{Config, LogFormat};
use turnos_service::{build_router, db, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::load().context("failed to load configuration")?;

    // Initialize tracing
    init_tracing(config.log.format);
    tracing::info!("Configuration loaded successfully");

    // The listener is only bound once the database answers
    let store = match db::connect(&config).await {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("Error connecting to the database: {:#}", e);
            return Err(e.context("database connection failed"));
        }
    };
    tracing::info!("Database connection established");

    // Build application state
    let state = AppState::new(store, config.clone());

    // Build router
    let app = build_router(state);

    // Start server
    let addr = config.bind_addr();
    tracing::info!("Starting server on {}", addr);
    tracing::info!("API documentation at {}", config.docs.path);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "turnos_service=debug,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

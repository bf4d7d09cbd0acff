use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;
use worldsync::api::{create_router, AppState};
use worldsync::config::load_or_default;
use worldsync::state::WorldStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "worldsync=info,tower_http=info".into()),
        )
        .init();

    info!("worldsync starting...");

    let config_path =
        std::env::var("WORLDSYNC_CONFIG").unwrap_or_else(|_| "worldsync.toml".to_string());
    let config = load_or_default(&config_path).context("Failed to load configuration")?;

    info!(
        config_path = %config_path,
        bind = %config.server.bind_address(),
        static_dir = %config.api.static_dir.display(),
        body_size_limit_bytes = config.api.body_size_limit_bytes,
        clear_resets_listeners = config.world.clear_resets_listeners,
        "Configuration loaded"
    );

    let store = Arc::new(WorldStore::new());
    let router = create_router(AppState::from_config(store, &config));

    let listener = tokio::net::TcpListener::bind(config.server.bind_address())
        .await
        .with_context(|| format!("Failed to bind {}", config.server.bind_address()))?;
    info!(address = %config.server.bind_address(), "HTTP API listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("worldsync stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for ctrl_c signal");
        // Without a signal handler, run until the process is killed
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

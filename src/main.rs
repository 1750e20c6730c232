//! Pomodoro - A pausable countdown timer with an HTTP control surface
//!
//! This is the main entry point for the pomodoro application.

use std::sync::Arc;
use chrono::TimeDelta;
use tokio::net::TcpListener;
use tracing::info;

use pomodoro::{
    config::Config,
    state::AppState,
    api::create_router,
    tasks::title_update_task,
    utils::{format_remaining, shutdown_signal},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("pomodoro={},tower_http=info", config.log_level()))
        .init();

    let duration = config.duration();
    if duration.is_zero() {
        anyhow::bail!("countdown duration must be greater than zero");
    }

    info!("Starting pomodoro server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, countdown={}",
          config.host, config.port, format_remaining(TimeDelta::from_std(duration)?));

    // Create application state
    let state = Arc::new(AppState::new(config.port, config.host.clone(), duration));

    // Follow timer snapshots the way a tray title would
    let title_state = Arc::clone(&state);
    tokio::spawn(async move {
        title_update_task(title_state).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start  - (Re-)start the countdown");
    info!("  POST /pause  - Pause the countdown");
    info!("  POST /resume - Resume the countdown");
    info!("  GET  /status - Check timer status");
    info!("  GET  /health - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        result = shutdown_signal() => {
            result?;
            info!("Shutdown signal received");
        }
    }

    state.shutdown().await;
    info!("Server shutdown complete");
    Ok(())
}

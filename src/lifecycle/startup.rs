//! Startup orchestration.
//!
//! # Responsibilities
//! - Start background tasks (metrics, config watcher, signals)
//! - Bind the listener and serve until shutdown
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listener binds last (traffic only when ready)

use std::net::SocketAddr;
use std::path::Path;

use tokio::net::TcpListener;
use tokio::sync::mpsc;

use crate::config::{ConfigWatcher, ConsoleConfig};
use crate::http::ConsoleServer;
use crate::lifecycle::{signals, Shutdown};
use crate::observability::metrics;

/// Run the console until a termination signal.
///
/// When `config_path` is given the file is watched and route changes are
/// applied without a restart.
pub async fn run(
    config: ConsoleConfig,
    config_path: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.base_url,
        routes = config.routes.len(),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    // The watcher handle must outlive the server.
    let (_watcher, config_updates) = match config_path {
        Some(path) => {
            let (watcher, updates) = ConfigWatcher::new(path);
            let watcher = match std::fs::read_to_string(path) {
                Ok(current) => watcher.with_current(current),
                Err(_) => watcher,
            };
            (Some(watcher.run()?), updates)
        }
        None => {
            let (_, updates) = mpsc::unbounded_channel();
            (None, updates)
        }
    };

    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(shutdown.clone());

    let server = ConsoleServer::new(config.clone())?;
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    server.run(listener, config_updates, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

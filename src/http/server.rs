//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, timeout, request ID, metrics)
//! - Bind server to listener
//! - Swap in a rebuilt route table when a new config arrives
//!
//! Only `routes` and `assets` reload live. Listener, upstream, timeout and
//! observability changes are logged and wait for a restart.

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::composites::{CompositeLoader, FetchError, HttpCompositeSource};
use crate::config::ConsoleConfig;
use crate::http::handlers;
use crate::http::request::{track_requests, ConsoleRequestId};
use crate::routing::{RouteError, RouteTable};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid routes: {}", join_errors(.0))]
    Routes(Vec<RouteError>),

    #[error("upstream client: {0}")]
    Upstream(#[from] FetchError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn join_errors(errors: &[RouteError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<ArcSwap<RouteTable>>,
    pub loader: Arc<CompositeLoader<HttpCompositeSource>>,
}

/// HTTP server for the story console.
pub struct ConsoleServer {
    router: Router,
    state: AppState,
    config: ConsoleConfig,
}

impl ConsoleServer {
    /// Create a new server with the given configuration.
    pub fn new(config: ConsoleConfig) -> Result<Self, ServerError> {
        let table = RouteTable::from_config(&config.routes, &config.assets).map_err(ServerError::Routes)?;
        let source = HttpCompositeSource::new(&config.upstream)?;

        let state = AppState {
            routes: Arc::new(ArcSwap::from_pointee(table)),
            loader: Arc::new(CompositeLoader::new(source)),
        };

        let router = Self::build_router(&config, state.clone());
        Ok(Self {
            router,
            state,
            config,
        })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ConsoleConfig, state: AppState) -> Router {
        Router::new()
            .route("/health", get(handlers::health))
            .route("/api/routes", get(handlers::list_routes))
            .route("/api/resolve", get(handlers::resolve))
            .route("/api/composites", get(handlers::list_composites))
            .route("/api/composites/{identifier}", get(handlers::get_composite))
            .route("/api/steps/validate", post(handlers::validate_step))
            .with_state(state)
            .layer(middleware::from_fn(track_requests))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(ConsoleRequestId))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::x_request_id()),
            )
    }

    /// The router, for driving the server without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Shared state, e.g. to inspect the live route table.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    /// Run until the shutdown signal fires.
    ///
    /// Configs received on `config_updates` replace the route table as a whole.
    /// Other sections keep their startup values.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<ConsoleConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), ServerError> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            routes = self.state.routes.load().len(),
            upstream = %self.state.loader.source().base_url(),
            "Console server starting"
        );

        let routes = self.state.routes.clone();
        let mut running = self.config;
        tokio::spawn(async move {
            while let Some(new_config) = config_updates.recv().await {
                apply_update(&routes, &mut running, new_config);
            }
        });

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("Console server stopped");
        Ok(())
    }
}

/// Apply the live-reloadable part of `next` on top of `running`.
///
/// Returns the sections that changed but need a restart. `running` only
/// takes the routes and assets of `next`, and only if they compile.
pub fn apply_update(
    routes: &ArcSwap<RouteTable>,
    running: &mut ConsoleConfig,
    next: ConsoleConfig,
) -> Vec<&'static str> {
    let pending = running.sections_needing_restart(&next);
    if !pending.is_empty() {
        tracing::warn!(
            sections = ?pending,
            "Config changes outside routes and assets need a restart, ignoring them"
        );
    }

    if apply_config(routes, &next) {
        running.routes = next.routes;
        running.assets = next.assets;
    }
    pending
}

/// Rebuild the route table from `config` and swap it in. Keeps the current
/// table when the new routes do not compile.
pub fn apply_config(routes: &ArcSwap<RouteTable>, config: &ConsoleConfig) -> bool {
    match RouteTable::from_config(&config.routes, &config.assets) {
        Ok(table) => {
            tracing::info!(routes = table.len(), "Route table reloaded");
            routes.store(Arc::new(table));
            true
        }
        Err(errors) => {
            for e in &errors {
                tracing::error!(error = %e, "Rejected reloaded route");
            }
            false
        }
    }
}

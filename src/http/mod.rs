//! HTTP API subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, metrics)
//!     → handlers.rs
//!         /api/resolve        → routing (RouteTable::lookup)
//!         /api/composites/... → composites (CompositeLoader)
//!         /api/steps/validate → composites::step_text
//!     → JSON response carrying x-request-id
//! ```

pub mod handlers;
pub mod request;
pub mod server;

pub use request::{ConsoleRequestId, X_REQUEST_ID};
pub use server::{apply_config, apply_update, AppState, ConsoleServer, ServerError};

//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ConsoleConfig (validated, immutable)
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → server rebuilds the RouteTable and swaps it atomically
//!     → other changed sections are logged and wait for a restart
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require full reload
//! - Only routes and assets reload live
//! - All fields have defaults; an empty file yields the built-in routes
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    default_routes, AssetsConfig, ConsoleConfig, ListenerConfig, ObservabilityConfig,
    RouteConfig, TimeoutConfig, UpstreamConfig,
};
pub use validation::{validate_config, ValidationError};
pub use watcher::{ConfigWatcher, ReloadOutcome};

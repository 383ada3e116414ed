//! Story console: navigation and composite loading for the story editor.

pub mod composites;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod ui;

pub use composites::{CompositeLoader, CompositeResource, HttpCompositeSource};
pub use config::ConsoleConfig;
pub use http::ConsoleServer;
pub use lifecycle::Shutdown;
pub use routing::{RouteMatch, RouteTable};

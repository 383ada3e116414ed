//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Location change (path)
//!     → router.rs (route lookup)
//!     → matcher.rs (evaluate path pattern, capture params)
//!     → Return: RouteMatch (template + controller) or no-match
//!
//! Route Compilation (at startup or reload):
//!     RouteConfig[]
//!     → Compile patterns into tokens
//!     → Sort by priority, then specificity
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Routes compiled once, immutable at runtime
//! - Deterministic: same path always matches same route
//! - More specific (longer literal prefix) pattern wins

pub mod matcher;
pub mod router;

pub use matcher::{Params, PathPattern, PatternError};
pub use router::{template_url, RouteEntry, RouteError, RouteMatch, RouteTable, DEFAULT_ASSETS_PREFIX};

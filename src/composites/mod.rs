//! Composite resource subsystem.
//!
//! # Data Flow
//! ```text
//! Controller asks for "com.example.Foo"
//!     → loader.rs (fetch with fallback)
//!     → source.rs (GET {base}/composites/com.example.Foo, no cache)
//!     → 2xx: decode as CompositeResource (model.rs), returned unchanged
//!     → any failure: synthesize { package, class, one blank step, isNew }
//! ```

pub mod loader;
pub mod model;
pub mod source;
pub mod step_text;

pub use loader::{CompositeLoader, Loaded, Origin};
pub use model::{CompositeResource, CompositeStep, ResourceIdentifier};
pub use source::{CompositeSource, FetchError, HttpCompositeSource};
pub use step_text::{is_valid_step_text, parse_step_text, StepKeyword};

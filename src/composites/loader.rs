//! Composite loading with local fallback.
//!
//! # Responsibilities
//! - Fetch a composite resource by fully-qualified class name
//! - Synthesize a new, editable resource when the fetch fails
//! - List the known composite classes
//!
//! # Design Decisions
//! - `fetch` never fails: every upstream error degrades to the synthesized default
//! - Server errors are masked the same way as 404; `fetch_traced` keeps the
//!   cause so callers and metrics can tell them apart
//! - Listing surfaces its errors, there is nothing sensible to synthesize

use serde_json::Value;

use crate::composites::model::{CompositeResource, ResourceIdentifier};
use crate::composites::source::{CompositeSource, FetchError};
use crate::observability::metrics;

/// Where a loaded resource came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    Remote,
    Synthesized(FetchError),
}

/// A resource together with its origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded {
    pub resource: CompositeResource,
    pub origin: Origin,
}

/// Resolves composite identifiers through a [`CompositeSource`].
#[derive(Debug, Clone)]
pub struct CompositeLoader<S> {
    source: S,
}

impl<S: CompositeSource> CompositeLoader<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Resolve an identifier. Never fails.
    pub async fn fetch(&self, identifier: &str) -> CompositeResource {
        self.fetch_traced(identifier).await.resource
    }

    /// Resolve an identifier, reporting whether the result was synthesized.
    pub async fn fetch_traced(&self, identifier: &str) -> Loaded {
        let id = ResourceIdentifier::new(identifier);

        match self.fetch_remote(&id).await {
            Ok(resource) => {
                metrics::record_composite_fetch("remote", "none");
                Loaded {
                    resource,
                    origin: Origin::Remote,
                }
            }
            Err(e) => {
                if e.is_not_found() {
                    tracing::debug!(identifier = %id, "Composite not found upstream, starting a new one");
                } else {
                    tracing::warn!(
                        identifier = %id,
                        reason = e.reason(),
                        error = %e,
                        "Composite fetch failed, falling back to a new resource"
                    );
                }
                metrics::record_composite_fetch("synthesized", e.reason());
                Loaded {
                    resource: CompositeResource::synthesize(&id),
                    origin: Origin::Synthesized(e),
                }
            }
        }
    }

    /// All composite classes known upstream.
    pub async fn list_composites(&self) -> Result<Value, FetchError> {
        self.source.get_json(&["composites"]).await
    }

    async fn fetch_remote(&self, id: &ResourceIdentifier) -> Result<CompositeResource, FetchError> {
        let body = self.source.get_json(&["composites", id.as_str()]).await?;
        serde_json::from_value(body).map_err(|e| FetchError::Decode(e.to_string()))
    }
}

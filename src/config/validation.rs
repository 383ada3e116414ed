//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses, URLs and value ranges (timeouts > 0)
//! - Detect conflicting or malformed routes
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ConsoleConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::ConsoleConfig;
use crate::routing::{RouteError, RouteTable};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid listener bind address `{0}`")]
    BindAddress(String),

    #[error("invalid metrics address `{0}`")]
    MetricsAddress(String),

    #[error("invalid upstream base url `{0}`")]
    UpstreamUrl(String),

    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error("no routes configured")]
    NoRoutes,

    #[error(transparent)]
    Route(#[from] RouteError),
}

pub fn validate_config(config: &ConsoleConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    match Url::parse(&config.upstream.base_url) {
        Ok(url) if !url.cannot_be_a_base() && matches!(url.scheme(), "http" | "https") => {}
        _ => errors.push(ValidationError::UpstreamUrl(config.upstream.base_url.clone())),
    }

    if config.upstream.connect_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("upstream.connect_timeout_secs"));
    }
    if config.upstream.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("upstream.request_timeout_secs"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("timeouts.request_secs"));
    }

    if config.routes.is_empty() {
        errors.push(ValidationError::NoRoutes);
    } else if let Err(route_errors) = RouteTable::from_config(&config.routes, &config.assets) {
        errors.extend(route_errors.into_iter().map(ValidationError::from));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

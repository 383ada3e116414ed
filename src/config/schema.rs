//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the console.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::routing::DEFAULT_ASSETS_PREFIX;

/// Root configuration for the story console.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream API serving composites.
    pub upstream: UpstreamConfig,

    /// Where view templates are served from.
    pub assets: AssetsConfig,

    /// Route definitions mapping location paths to views.
    pub routes: Vec<RouteConfig>,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            upstream: UpstreamConfig::default(),
            assets: AssetsConfig::default(),
            routes: default_routes(),
            timeouts: TimeoutConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

impl ConsoleConfig {
    /// Sections of `next` that differ from `self` and only take effect on
    /// restart. Routes and assets are applied live and never listed.
    pub fn sections_needing_restart(&self, next: &ConsoleConfig) -> Vec<&'static str> {
        let mut changed = Vec::new();
        if self.listener != next.listener {
            changed.push("listener");
        }
        if self.upstream != next.upstream {
            changed.push("upstream");
        }
        if self.timeouts != next.timeouts {
            changed.push("timeouts");
        }
        if self.observability != next.observability {
            changed.push("observability");
        }
        changed
    }
}

/// Listener configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Upstream API configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL the `/composites` endpoints hang off.
    pub base_url: String,

    /// Connection establishment timeout in seconds.
    pub connect_timeout_secs: u64,

    /// Total request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:9000".to_string(),
            connect_timeout_secs: 5,
            request_timeout_secs: 30,
        }
    }
}

/// Template asset configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Prefix prepended to `{template_id}.tmpl.html`.
    pub template_prefix: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            template_prefix: DEFAULT_ASSETS_PREFIX.to_string(),
        }
    }
}

/// Route configuration binding a path pattern to a view.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Path pattern, e.g. `/page/stories/view/:path*`.
    pub pattern: String,

    /// Template identifier, e.g. `story/story`.
    pub template_id: String,

    /// Controller activated for the view.
    pub controller_id: String,

    /// Route priority (higher = checked first).
    #[serde(default)]
    pub priority: u32,

    /// Compare literal text ignoring ASCII case.
    #[serde(default)]
    pub case_insensitive: bool,
}

impl RouteConfig {
    pub fn new(pattern: &str, template_id: &str, controller_id: &str) -> Self {
        Self {
            pattern: pattern.to_string(),
            template_id: template_id.to_string(),
            controller_id: controller_id.to_string(),
            priority: 0,
            case_insensitive: false,
        }
    }
}

/// The console's built-in view bindings.
pub fn default_routes() -> Vec<RouteConfig> {
    vec![
        RouteConfig::new("/page/stories/new/", "story/story", "storyCtrl"),
        RouteConfig::new("/page/stories/new/:path*", "story/story", "storyCtrl"),
        RouteConfig::new("/page/stories/view/:path*", "story/story", "storyCtrl"),
        RouteConfig::new("/page/composites/:className*", "composites/composites", "compositesCtrl"),
        RouteConfig::new("/page/runner/", "runner/runner", "runnerCtrl"),
    ]
}

/// Timeout configuration for the console's own handlers.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 60 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

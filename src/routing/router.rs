//! Route lookup.
//!
//! # Responsibilities
//! - Store compiled routes
//! - Look up the view binding for a location path
//! - Return the matched route or an explicit no-match
//!
//! # Design Decisions
//! - Immutable after construction; reloads build a new table
//! - Routes ordered once at build time, first match wins
//! - Declared patterns are unique

use std::collections::HashMap;

use serde::Serialize;
use thiserror::Error;

use crate::config::{AssetsConfig, RouteConfig};
use crate::routing::matcher::{Params, PathPattern, PatternError};

/// Asset prefix used when none is configured.
pub const DEFAULT_ASSETS_PREFIX: &str = "/assets/html";

/// Location of the template served for a template id.
pub fn template_url(prefix: &str, template_id: &str) -> String {
    format!("{}/{}.tmpl.html", prefix.trim_end_matches('/'), template_id)
}

/// Errors raised while building a route table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error(transparent)]
    Pattern(#[from] PatternError),

    #[error("pattern `{0}` is declared more than once")]
    DuplicatePattern(String),

    #[error("route `{0}` has an empty template id")]
    EmptyTemplate(String),

    #[error("route `{0}` has an empty controller id")]
    EmptyController(String),
}

/// A path pattern bound to a view template and its controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteEntry {
    pub path_pattern: String,
    pub template_id: String,
    pub controller_id: String,
    pub priority: u32,
    pub case_insensitive: bool,
}

impl From<&RouteConfig> for RouteEntry {
    fn from(config: &RouteConfig) -> Self {
        Self {
            path_pattern: config.pattern.clone(),
            template_id: config.template_id.clone(),
            controller_id: config.controller_id.clone(),
            priority: config.priority,
            case_insensitive: config.case_insensitive,
        }
    }
}

/// Result of a successful lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub entry: RouteEntry,
    pub template_url: String,
    pub params: Params,
}

#[derive(Debug)]
struct CompiledRoute {
    pattern: PathPattern,
    index: usize,
}

/// Immutable lookup table from path patterns to view bindings.
#[derive(Debug)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
    compiled: Vec<CompiledRoute>,
    by_pattern: HashMap<String, usize>,
    assets_prefix: String,
}

impl RouteTable {
    /// Build a table from entries in declaration order.
    ///
    /// Every problem is reported, not just the first one.
    pub fn new(
        entries: Vec<RouteEntry>,
        assets_prefix: impl Into<String>,
    ) -> Result<Self, Vec<RouteError>> {
        let mut errors = Vec::new();
        let mut compiled = Vec::with_capacity(entries.len());
        let mut by_pattern = HashMap::with_capacity(entries.len());

        for (index, entry) in entries.iter().enumerate() {
            if entry.template_id.trim().is_empty() {
                errors.push(RouteError::EmptyTemplate(entry.path_pattern.clone()));
            }
            if entry.controller_id.trim().is_empty() {
                errors.push(RouteError::EmptyController(entry.path_pattern.clone()));
            }
            if by_pattern.insert(entry.path_pattern.clone(), index).is_some() {
                errors.push(RouteError::DuplicatePattern(entry.path_pattern.clone()));
                continue;
            }
            match PathPattern::compile(&entry.path_pattern, entry.case_insensitive) {
                Ok(pattern) => compiled.push(CompiledRoute { pattern, index }),
                Err(e) => errors.push(e.into()),
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        // Higher priority first, then the more specific pattern. The sort is
        // stable so declaration order breaks the remaining ties.
        compiled.sort_by(|a, b| {
            let pa = entries[a.index].priority;
            let pb = entries[b.index].priority;
            pb.cmp(&pa)
                .then(b.pattern.literal_prefix_len().cmp(&a.pattern.literal_prefix_len()))
                .then(b.pattern.literal_len().cmp(&a.pattern.literal_len()))
        });

        Ok(Self {
            entries,
            compiled,
            by_pattern,
            assets_prefix: assets_prefix.into(),
        })
    }

    /// Build a table from configuration.
    pub fn from_config(
        routes: &[RouteConfig],
        assets: &AssetsConfig,
    ) -> Result<Self, Vec<RouteError>> {
        let entries = routes.iter().map(RouteEntry::from).collect();
        Self::new(entries, assets.template_prefix.clone())
    }

    /// Find the route activated by a location path.
    ///
    /// Query string and fragment are ignored. `None` means no route matches.
    pub fn lookup(&self, path: &str) -> Option<RouteMatch> {
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default();

        self.compiled.iter().find_map(|route| {
            route.pattern.matches(path).map(|params| {
                let entry = self.entries[route.index].clone();
                RouteMatch {
                    template_url: self.template_url(&entry),
                    entry,
                    params,
                }
            })
        })
    }

    /// Entry declared with exactly this pattern.
    pub fn get(&self, pattern: &str) -> Option<&RouteEntry> {
        self.by_pattern.get(pattern).map(|&i| &self.entries[i])
    }

    /// Entries in declaration order.
    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn template_url(&self, entry: &RouteEntry) -> String {
        template_url(&self.assets_prefix, &entry.template_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

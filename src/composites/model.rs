//! Composite resource types.
//!
//! Field names follow the upstream JSON (`stepText`, `compositeSteps`,
//! `isNew`). Fields this crate does not know about are kept in `extra` so a
//! fetched resource is passed through unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A dot-separated, fully-qualified composite class name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceIdentifier(String);

impl ResourceIdentifier {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Everything before the last `.`, or `""` when there is no dot.
    pub fn package_name(&self) -> &str {
        match self.0.rfind('.') {
            Some(i) => &self.0[..i],
            None => "",
        }
    }

    /// The final segment, or the whole identifier when there is no dot.
    pub fn class_name(&self) -> &str {
        match self.0.rfind('.') {
            Some(i) => &self.0[i + 1..],
            None => &self.0,
        }
    }
}

impl std::fmt::Display for ResourceIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One step of a composite, with its nested steps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompositeStep {
    #[serde(rename = "stepText", default)]
    pub step_text: String,

    #[serde(rename = "compositeSteps", default)]
    pub composite_steps: Vec<Map<String, Value>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CompositeStep {
    /// Empty step holding a single empty nested step, ready for editing.
    pub fn blank() -> Self {
        Self {
            step_text: String::new(),
            composite_steps: vec![Map::new()],
            extra: Map::new(),
        }
    }
}

/// A composite class and its steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeResource {
    #[serde(default)]
    pub package: String,

    #[serde(default)]
    pub class: String,

    #[serde(default)]
    pub composites: Vec<CompositeStep>,

    /// Absent on most server payloads; absent means `false`.
    #[serde(rename = "isNew", default, skip_serializing_if = "Option::is_none")]
    pub is_new: Option<bool>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CompositeResource {
    /// Default resource for an identifier the server could not provide.
    pub fn synthesize(id: &ResourceIdentifier) -> Self {
        Self {
            package: id.package_name().to_string(),
            class: id.class_name().to_string(),
            composites: vec![CompositeStep::blank()],
            is_new: Some(true),
            extra: Map::new(),
        }
    }

    pub fn is_new(&self) -> bool {
        self.is_new.unwrap_or(false)
    }

    /// `package.class`, or just `class` for the default package.
    pub fn full_class_name(&self) -> String {
        if self.package.is_empty() {
            self.class.clone()
        } else {
            format!("{}.{}", self.package, self.class)
        }
    }
}

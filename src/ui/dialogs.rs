//! Dialog openers.
//!
//! The dialog chrome lives in a [`ModalHost`]; this module only decides which
//! template and controller to show and what data to resolve for them.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::composites::{CompositeLoader, CompositeSource, FetchError};
use crate::routing::{template_url, DEFAULT_ASSETS_PREFIX};

pub const CONFIRMATION_TEMPLATE: &str = "confirmationModal";
pub const CONFIRMATION_CONTROLLER: &str = "modalCtrl";
pub const COMPOSITE_CLASSES_TEMPLATE: &str = "compositeClasses/compositeClasses";
pub const COMPOSITE_CLASSES_CONTROLLER: &str = "compositeClassesCtrl";

/// Everything a modal host needs to open a dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct DialogRequest {
    pub template_url: String,
    pub controller: String,
    /// Data handed to the dialog controller, by name.
    pub resolve: BTreeMap<String, Value>,
}

/// Presentation layer that actually shows dialogs.
pub trait ModalHost {
    type Handle;

    fn open(&self, request: DialogRequest) -> Self::Handle;
}

/// Ask the user to confirm something described by `data`.
pub fn open_confirmation_modal<H: ModalHost>(host: &H, data: Value) -> H::Handle {
    host.open(DialogRequest {
        template_url: template_url(DEFAULT_ASSETS_PREFIX, CONFIRMATION_TEMPLATE),
        controller: CONFIRMATION_CONTROLLER.to_string(),
        resolve: BTreeMap::from([("data".to_string(), data)]),
    })
}

/// Offer the known composite classes for `step_text`.
///
/// The class list is loaded before the dialog opens; if that fails no dialog
/// is shown and the error is returned.
pub async fn open_composite_classes<H, S>(
    host: &H,
    loader: &CompositeLoader<S>,
    step_text: &str,
) -> Result<H::Handle, FetchError>
where
    H: ModalHost,
    S: CompositeSource,
{
    let classes = loader.list_composites().await.map_err(|e| {
        tracing::warn!(error = %e, "Could not load composite classes");
        e
    })?;

    Ok(host.open(DialogRequest {
        template_url: template_url(DEFAULT_ASSETS_PREFIX, COMPOSITE_CLASSES_TEMPLATE),
        controller: COMPOSITE_CLASSES_CONTROLLER.to_string(),
        resolve: BTreeMap::from([
            ("compositeClasses".to_string(), classes),
            ("compositeStepText".to_string(), Value::String(step_text.to_string())),
        ]),
    }))
}

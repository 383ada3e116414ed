//! Editor-side helpers.
//!
//! - forms.rs: collection editing and validity-driven button styling
//! - dialogs.rs: confirmation and composite-class dialogs over a `ModalHost`

pub mod dialogs;
pub mod forms;

pub use dialogs::{open_composite_classes, open_confirmation_modal, DialogRequest, ModalHost};
pub use forms::{button_css_class, new_collection_item, remove_collection_element, FieldValidity, ENTER_KEY};

//! Form helpers for the step editor.

use std::collections::BTreeMap;

/// Key code of the Enter key.
pub const ENTER_KEY: u32 = 13;

/// Validity of a form field as reported by the form host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValidity {
    Valid,
    Invalid,
}

impl FieldValidity {
    pub fn is_valid(self) -> bool {
        self == FieldValidity::Valid
    }
}

impl From<bool> for FieldValidity {
    fn from(valid: bool) -> Self {
        if valid {
            FieldValidity::Valid
        } else {
            FieldValidity::Invalid
        }
    }
}

/// Append an empty element when Enter was pressed.
///
/// Returns whether an element was added.
pub fn new_collection_item<T: Default>(key_code: u32, collection: &mut Vec<T>) -> bool {
    if key_code == ENTER_KEY {
        collection.push(T::default());
        true
    } else {
        false
    }
}

/// Remove the element at `index`. Out-of-range indexes leave the collection untouched.
pub fn remove_collection_element<T>(collection: &mut Vec<T>, index: usize) -> Option<T> {
    if index < collection.len() {
        Some(collection.remove(index))
    } else {
        None
    }
}

/// CSS classes toggled on a button by the validity of its field.
pub fn button_css_class(validity: FieldValidity) -> BTreeMap<&'static str, bool> {
    BTreeMap::from([
        ("btn-success", validity.is_valid()),
        ("btn-danger", !validity.is_valid()),
    ])
}

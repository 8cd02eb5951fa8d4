//! Guarded text assignment.

use tracing::trace;

use crate::dom::Document;

/// Set the text of the element with `id` to `value`.
///
/// Does nothing when the value is absent or no such element exists.
/// Returns whether the element was updated.
pub fn set_text<V: AsRef<str>>(doc: &mut Document, id: &str, value: Option<V>) -> bool {
    let Some(value) = value else {
        return false;
    };
    let Some(node) = doc.get_element_by_id(id) else {
        trace!(id, "No element to bind");
        return false;
    };
    doc.set_text_content(node, value.as_ref());
    true
}

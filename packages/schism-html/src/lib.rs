//! HTML parsing for the Schism render tree
//!
//! Two entry points:
//!
//!  - [`HtmlDocument::from_html`] parses a whole document into a fresh [`BaseDocument`](schism_dom::BaseDocument).
//!  - [`set_inner_html`] replaces a node's children with a parsed fragment, the way assigning
//!    `innerHTML` does in a browser.

mod html_document;
mod html_sink;

pub use html_document::HtmlDocument;
pub use html_sink::DocumentHtmlParser;

use schism_dom::{BaseDocument, DomError};

/// Replace `node_id`'s children with `markup` parsed as an HTML fragment.
///
/// The old children are dropped. Parsing itself never fails: malformed markup is
/// repaired the way browsers repair it. The node must be a live element.
pub fn set_inner_html(doc: &mut BaseDocument, node_id: usize, markup: &str) -> Result<(), DomError> {
    let node = doc.get_node(node_id).ok_or(DomError::MissingNode(node_id))?;
    if !node.is_element() {
        return Err(DomError::NotAnElement(node_id));
    }
    doc.mutate().remove_and_drop_children(node_id);
    DocumentHtmlParser::parse_fragment_into_node(doc, node_id, markup);
    Ok(())
}

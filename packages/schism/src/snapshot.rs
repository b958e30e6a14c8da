use schism_dom::{BaseDocument, DomError, SnapshotNode};
use schism_html::set_inner_html;

/// The host's pristine content, captured once at construction.
///
/// `markup` is what rebuilds and teardown restore from. `structure` is a deep
/// copy of the host element itself, used when a detached host needs a stand-in
/// that can be attached and styled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSnapshot {
    markup: String,
    structure: SnapshotNode,
}

impl SourceSnapshot {
    pub fn capture(doc: &BaseDocument, host: usize) -> Result<Self, DomError> {
        Ok(Self {
            markup: doc.inner_html(host),
            structure: doc.snapshot_subtree(host)?,
        })
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }

    pub fn structure(&self) -> &SnapshotNode {
        &self.structure
    }

    /// Replace the host's children with the captured markup
    pub fn restore(&self, doc: &mut BaseDocument, host: usize) -> Result<(), DomError> {
        set_inner_html(doc, host, &self.markup)
    }
}

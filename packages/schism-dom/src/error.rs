/// Errors from operations addressed at a specific node
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomError {
    #[error("Node {0} does not exist")]
    MissingNode(usize),

    #[error("Node {0} is not an element")]
    NotAnElement(usize),

    #[error("Node {0} is not a text node")]
    NotATextNode(usize),

    #[error("The document node cannot be cloned or snapshotted")]
    DocumentNode,

    #[error("Layout failed: {0}")]
    Layout(String),
}

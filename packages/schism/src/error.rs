//! Error types for configuration and measurement

/// A construction option was missing or not recognised.
///
/// These leave the instance inert rather than failing construction.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Split needs a target element")]
    MissingTarget,

    #[error("Split target {0} is not an element in the document")]
    UnknownTarget(usize),

    #[error("Split needs a mutation. Choose `chars`, `words` or `lines` (got `{0}`)")]
    UnknownMutation(String),

    #[error("Overflow must be `hidden` or `visible` (got `{0}`)")]
    UnknownOverflow(String),

    #[error("Resize debounce must be a positive number of milliseconds (got {0})")]
    InvalidDebounce(u64),

    #[error("Line threshold ratio must be a positive, finite number (got {0})")]
    InvalidLineThreshold(f32),
}

/// Why a unit could not be measured
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ProbeError {
    #[error("Node {0} is not attached to the document")]
    Detached(usize),

    #[error("Node {0} has no layout box")]
    NotLaidOut(usize),
}

//! Resize notifications delivered from a document to interested parties.

/// Where a resize notification originated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeSource {
    /// The window (viewport) changed size
    Window,
    /// An observed node's laid out box changed size. Carries the node id.
    Observer(usize),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeEvent {
    pub source: ResizeSource,
    /// New width in CSS pixels
    pub width: f32,
    /// New height in CSS pixels
    pub height: f32,
}

impl ResizeEvent {
    pub fn window(width: f32, height: f32) -> Self {
        Self {
            source: ResizeSource::Window,
            width,
            height,
        }
    }

    pub fn observed(node_id: usize, width: f32, height: f32) -> Self {
        Self {
            source: ResizeSource::Observer(node_id),
            width,
            height,
        }
    }
}

/// A box measured relative to a reference container's origin.
///
/// `top` and `left` are offsets from the container's own top-left corner, not
/// from the viewport.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UnitRect {
    pub width: f32,
    pub height: f32,
    pub top: f32,
    pub left: f32,
}

impl UnitRect {
    pub fn new(width: f32, height: f32, top: f32, left: f32) -> Self {
        Self {
            width,
            height,
            top,
            left,
        }
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }
}

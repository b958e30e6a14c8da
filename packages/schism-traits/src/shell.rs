/// The host window's dimensions and scale factor.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    /// Physical window size in device pixels
    pub window_size: (u32, u32),
    hidpi_scale: f32,
    zoom: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            window_size: (800, 600),
            hidpi_scale: 1.0,
            zoom: 1.0,
        }
    }
}

impl Viewport {
    pub fn new(physical_width: u32, physical_height: u32, scale_factor: f32) -> Self {
        Self {
            window_size: (physical_width, physical_height),
            hidpi_scale: scale_factor,
            zoom: 1.0,
        }
    }

    /// Total scaling, the product of the hidpi scale and the zoom
    pub fn scale(&self) -> f32 {
        self.hidpi_scale * self.zoom
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn zoom_mut(&mut self) -> &mut f32 {
        &mut self.zoom
    }

    pub fn set_hidpi_scale(&mut self, scale: f32) {
        self.hidpi_scale = scale;
    }

    /// Width in CSS pixels
    pub fn css_width(&self) -> f32 {
        self.window_size.0 as f32 / self.scale()
    }

    /// Height in CSS pixels
    pub fn css_height(&self) -> f32 {
        self.window_size.1 as f32 / self.scale()
    }

    /// Whether `other` lays out to a different CSS size than `self`
    pub fn size_differs(&self, other: &Viewport) -> bool {
        self.css_width() != other.css_width() || self.css_height() != other.css_height()
    }
}

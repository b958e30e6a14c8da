use std::sync::Arc;

use schism_traits::Viewport;

use crate::layout::TextMeasurer;

/// Options used when constructing a [`BaseDocument`](crate::BaseDocument)
#[derive(Default, Clone)]
pub struct DocumentConfig {
    /// The initial `Viewport`
    pub viewport: Option<Viewport>,
    /// Font size of the root node in CSS pixels. Defaults to 16px.
    pub default_font_size: Option<f32>,
    /// Measures text runs during layout. Defaults to [`MonospaceMeasurer`](crate::layout::MonospaceMeasurer).
    pub text_measurer: Option<Arc<dyn TextMeasurer>>,
}

impl DocumentConfig {
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = Some(viewport);
        self
    }

    pub fn with_text_measurer(mut self, measurer: Arc<dyn TextMeasurer>) -> Self {
        self.text_measurer = Some(measurer);
        self
    }
}

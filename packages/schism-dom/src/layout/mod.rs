//! Lay the document out using taffy
//!
//! There is no inline formatting context. Every element becomes a wrapping
//! flex row, which places inline-level children left to right and starts a
//! new row when the next child does not fit. Block children take a full row.
//! This is enough to answer "which visual row is this box on" for runs of
//! inline-block boxes, which is what the splitter needs.

use schism_traits::ResizeEvent;
use taffy::NodeId;
use taffy::geometry::Size;
use taffy::style::{AvailableSpace, Style};
use unicode_width::UnicodeWidthStr;

use crate::node::NodeLayout;
use crate::{BaseDocument, DomError};

pub(crate) mod construct;

use construct::{LayoutTree, TextRun};

/// Measures the advance width of a run of text
pub trait TextMeasurer: Send + Sync {
    /// Width of `text` in CSS pixels when set at `font_size`
    fn measure_width(&self, text: &str, font_size: f32) -> f32;
}

/// Fixed advance per display column. Wide (e.g. CJK) characters take two columns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasurer {
    /// Advance of one column as a multiple of the font size
    pub advance_ratio: f32,
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        Self { advance_ratio: 0.5 }
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn measure_width(&self, text: &str, font_size: f32) -> f32 {
        text.width() as f32 * font_size * self.advance_ratio
    }
}

fn measure_text(
    known_dimensions: Size<Option<f32>>,
    available_space: Size<AvailableSpace>,
    _node_id: NodeId,
    run: Option<&mut TextRun>,
    _style: &Style,
) -> Size<f32> {
    let Some(run) = run else {
        return Size::ZERO;
    };

    let limit = known_dimensions.width.or(match available_space.width {
        AvailableSpace::Definite(width) => Some(width),
        _ => None,
    });

    match limit {
        Some(limit) if limit > 0.0 && run.width > limit => {
            let lines = (run.width / limit).ceil();
            Size {
                width: known_dimensions.width.unwrap_or(limit),
                height: known_dimensions.height.unwrap_or(lines * run.line_height),
            }
        }
        _ => Size {
            width: known_dimensions.width.unwrap_or(run.width),
            height: known_dimensions.height.unwrap_or(run.line_height),
        },
    }
}

impl BaseDocument {
    /// Recompute `final_layout` for every attached, displayed node.
    ///
    /// Detached nodes and nodes under `display: none` end up with no layout.
    /// Resize observers whose node changed size are notified afterwards.
    pub fn resolve_layout(&mut self) -> Result<(), DomError> {
        for (_, node) in self.nodes.iter_mut() {
            node.final_layout = None;
        }

        let LayoutTree {
            mut taffy,
            root,
            mapping,
        } = construct::build_layout_tree(self).map_err(|err| DomError::Layout(err.to_string()))?;

        let available = Size {
            width: AvailableSpace::Definite(self.viewport.css_width()),
            height: AvailableSpace::MaxContent,
        };
        taffy
            .compute_layout_with_measure(root, available, measure_text)
            .map_err(|err| DomError::Layout(err.to_string()))?;

        for (taffy_id, node_id) in mapping {
            let layout = taffy
                .layout(taffy_id)
                .map_err(|err| DomError::Layout(err.to_string()))?;
            self.nodes[node_id].final_layout = Some(NodeLayout {
                x: layout.location.x,
                y: layout.location.y,
                width: layout.size.width,
                height: layout.size.height,
            });
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(document = self.id(), nodes = taffy.total_node_count(), "resolved layout");

        self.notify_resize_observers();
        Ok(())
    }

    /// Size of the node's box from the last layout pass
    pub fn layout_size(&self, node_id: usize) -> Option<(f32, f32)> {
        let layout = self.get_node(node_id)?.final_layout?;
        Some((layout.width, layout.height))
    }

    pub(crate) fn window_resize_event(&self) -> ResizeEvent {
        ResizeEvent::window(self.viewport.css_width(), self.viewport.css_height())
    }
}

use taffy::TaffyTree;
use taffy::TaffyResult;
use taffy::NodeId;
use taffy::style::{AlignContent, AlignItems, Display, FlexDirection, FlexWrap, Style};
use taffy::style_helpers::{auto, length, percent};

use crate::BaseDocument;
use crate::node::NodeData;
use crate::style::{ComputedStyle, DisplayMode};

/// Context attached to taffy leaves that hold text
#[derive(Debug, Clone, Copy)]
pub(crate) struct TextRun {
    /// Unwrapped advance width
    pub width: f32,
    /// Height of one line box
    pub line_height: f32,
}

pub(crate) struct LayoutTree {
    pub taffy: TaffyTree<TextRun>,
    pub root: NodeId,
    /// Taffy node to document node
    pub mapping: Vec<(NodeId, usize)>,
}

/// Every container is a wrapping row, sized by its content unless told otherwise
fn container_style() -> Style {
    Style {
        display: Display::Flex,
        flex_direction: FlexDirection::Row,
        flex_wrap: FlexWrap::Wrap,
        align_items: Some(AlignItems::FlexStart),
        align_content: Some(AlignContent::FlexStart),
        flex_shrink: 0.0,
        ..Default::default()
    }
}

fn element_style(style: &ComputedStyle) -> Style {
    let mut taffy_style = container_style();
    match style.display {
        DisplayMode::Block => {
            taffy_style.size.width = style
                .width
                .map(|width| length(width))
                .unwrap_or_else(|| percent(1.0f32));
        }
        DisplayMode::InlineBlock => {
            if let Some(width) = style.width {
                taffy_style.size.width = length(width);
            }
        }
        DisplayMode::Inline | DisplayMode::None => {}
    }
    taffy_style
}

fn text_style() -> Style {
    Style {
        min_size: taffy::geometry::Size {
            width: length(0.0f32),
            height: auto(),
        },
        ..Default::default()
    }
}

pub(crate) fn build_layout_tree(doc: &BaseDocument) -> TaffyResult<LayoutTree> {
    let mut taffy = TaffyTree::new();
    let mut mapping = Vec::new();

    let root_style = ComputedStyle::root(doc.default_font_size);
    let mut children = Vec::new();
    for &child in &doc.root_node().children {
        if let Some(id) = build_node(doc, &mut taffy, &mut mapping, child, &root_style)? {
            children.push(id);
        }
    }

    let mut style = container_style();
    style.size.width = length(doc.viewport.css_width());
    let root = taffy.new_with_children(style, &children)?;
    mapping.push((root, doc.root_id()));

    Ok(LayoutTree {
        taffy,
        root,
        mapping,
    })
}

enum Child {
    Item(NodeId),
    /// A whitespace-only text node, not built yet
    Space(usize),
}

fn is_collapsible_whitespace(doc: &BaseDocument, node_id: usize) -> bool {
    doc.nodes[node_id].text_data().is_some_and(|text| {
        !text.content.is_empty()
            && text
                .content
                .chars()
                .all(|ch| matches!(ch, ' ' | '\t' | '\n' | '\r' | '\u{c}'))
    })
}

/// Whether the whitespace runs sit between every pair of neighbouring items.
///
/// Such a row is laid out with the runs collapsed into a column gap of one
/// space, so spaces never start or end a visual row. Rows where some items
/// touch keep their whitespace as ordinary text items.
fn separates_every_item(entries: &[Child]) -> bool {
    entries.iter().any(|entry| matches!(entry, Child::Space(_)))
        && entries
            .windows(2)
            .all(|pair| matches!(pair[0], Child::Space(_)) || matches!(pair[1], Child::Space(_)))
}

fn build_node(
    doc: &BaseDocument,
    taffy: &mut TaffyTree<TextRun>,
    mapping: &mut Vec<(NodeId, usize)>,
    node_id: usize,
    parent_style: &ComputedStyle,
) -> TaffyResult<Option<NodeId>> {
    let node = &doc.nodes[node_id];
    let style = ComputedStyle::resolve(parent_style, node);

    let taffy_id = match &node.data {
        NodeData::Document | NodeData::Comment(_) => return Ok(None),
        NodeData::Text(text) => {
            let run = TextRun {
                width: doc
                    .text_measurer
                    .measure_width(&text.content, style.font_size),
                line_height: style.line_box_height(),
            };
            taffy.new_leaf_with_context(text_style(), run)?
        }
        NodeData::Element(_) => {
            if style.display == DisplayMode::None {
                return Ok(None);
            }
            let mut entries = Vec::with_capacity(node.children.len());
            for &child in &node.children {
                if is_collapsible_whitespace(doc, child) {
                    entries.push(Child::Space(child));
                } else if let Some(id) = build_node(doc, taffy, mapping, child, &style)? {
                    entries.push(Child::Item(id));
                }
            }

            let mut taffy_style = element_style(&style);
            let collapse = separates_every_item(&entries);
            if collapse {
                let space = doc.text_measurer.measure_width(" ", style.font_size);
                taffy_style.gap.width = length(space);
            }

            let mut children = Vec::with_capacity(entries.len());
            for entry in entries {
                match entry {
                    Child::Item(id) => children.push(id),
                    Child::Space(_) if collapse => {}
                    Child::Space(child) => {
                        if let Some(id) = build_node(doc, taffy, mapping, child, &style)? {
                            children.push(id);
                        }
                    }
                }
            }
            taffy.new_with_children(taffy_style, &children)?
        }
    };

    mapping.push((taffy_id, node_id));
    Ok(Some(taffy_id))
}

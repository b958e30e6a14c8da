//! Inline style declarations and the small amount of style resolution the
//! layout pass needs.
//!
//! Only the `style` attribute is consulted. There is no cascade beyond
//! inheritance from the parent node.

use crate::node::{Node, NodeData};

/// Font size of the document root when nothing overrides it
pub const DEFAULT_FONT_SIZE: f32 = 16.0;
/// `normal` line height, as a multiple of the font size
pub const DEFAULT_LINE_HEIGHT: f32 = 1.2;

/// The ordered `property: value` pairs of a `style` attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleDeclarations {
    declarations: Vec<(String, String)>,
}

impl StyleDeclarations {
    pub fn parse(css: &str) -> Self {
        let declarations = css
            .split(';')
            .filter_map(|decl| {
                let (property, value) = decl.split_once(':')?;
                let property = property.trim().to_ascii_lowercase();
                let value = value.trim();
                if property.is_empty() || value.is_empty() {
                    return None;
                }
                Some((property, value.to_string()))
            })
            .collect();
        Self { declarations }
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .rev()
            .find(|(name, _)| name == property)
            .map(|(_, value)| value.as_str())
    }

    pub fn set(&mut self, property: &str, value: &str) {
        let property = property.to_ascii_lowercase();
        match self.declarations.iter_mut().find(|(name, _)| *name == property) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.declarations.push((property, value.to_string())),
        }
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Serialize as `a: b; c: d;`
    pub fn to_css_string(&self) -> String {
        self.declarations
            .iter()
            .map(|(property, value)| format!("{property}: {value};"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    Block,
    Inline,
    InlineBlock,
    None,
}

impl DisplayMode {
    fn default_for_tag(tag: &str) -> Self {
        match tag {
            "html" | "body" | "div" | "p" | "section" | "article" | "aside" | "header"
            | "footer" | "main" | "nav" | "blockquote" | "pre" | "ul" | "ol" | "li" | "h1"
            | "h2" | "h3" | "h4" | "h5" | "h6" | "figure" | "form" | "table" => {
                DisplayMode::Block
            }
            "head" | "script" | "style" | "template" | "title" | "meta" | "link" => {
                DisplayMode::None
            }
            _ => DisplayMode::Inline,
        }
    }

    fn parse(value: &str, parent: DisplayMode) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "inherit" => Some(parent),
            "none" => Some(DisplayMode::None),
            "inline" => Some(DisplayMode::Inline),
            "inline-block" | "inline-flex" | "inline-grid" => Some(DisplayMode::InlineBlock),
            "block" | "flex" | "grid" | "flow-root" | "list-item" => Some(DisplayMode::Block),
            _ => None,
        }
    }
}

/// The resolved values the layout pass and callers care about
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComputedStyle {
    pub display: DisplayMode,
    /// Font size in CSS pixels
    pub font_size: f32,
    /// Line height as a multiple of `font_size`
    pub line_height: f32,
    /// Explicit width in CSS pixels
    pub width: Option<f32>,
}

impl ComputedStyle {
    /// Style of the document root
    pub fn root(font_size: f32) -> Self {
        Self {
            display: DisplayMode::Block,
            font_size,
            line_height: DEFAULT_LINE_HEIGHT,
            width: None,
        }
    }

    /// Resolve `node`'s style given its parent's computed style
    pub fn resolve(parent: &ComputedStyle, node: &Node) -> Self {
        let element = match &node.data {
            NodeData::Element(element) => element,
            NodeData::Document => return *parent,
            NodeData::Text(_) | NodeData::Comment(_) => {
                return Self {
                    display: DisplayMode::Inline,
                    width: None,
                    ..*parent
                };
            }
        };

        let declarations = element.style_declarations();
        let display = declarations
            .get("display")
            .and_then(|value| DisplayMode::parse(value, parent.display))
            .unwrap_or_else(|| DisplayMode::default_for_tag(element.local_name()));
        let font_size = declarations
            .get("font-size")
            .and_then(|value| parse_font_size(value, parent.font_size))
            .unwrap_or(parent.font_size);
        let line_height = declarations
            .get("line-height")
            .and_then(|value| parse_line_height(value, font_size))
            .unwrap_or(parent.line_height);
        let width = declarations
            .get("width")
            .and_then(|value| parse_length(value, parent.font_size));

        Self {
            display,
            font_size,
            line_height,
            width,
        }
    }

    /// Height of one line box in CSS pixels
    pub fn line_box_height(&self) -> f32 {
        self.font_size * self.line_height
    }
}

/// Parse a `px` or `em` length. Unitless zero is accepted.
pub fn parse_length(value: &str, em: f32) -> Option<f32> {
    let value = value.trim();
    if let Some(px) = value.strip_suffix("px") {
        return px.trim().parse().ok();
    }
    if let Some(rel) = value.strip_suffix("em") {
        return rel.trim().parse::<f32>().ok().map(|rel| rel * em);
    }
    match value.parse::<f32>() {
        Ok(zero) if zero == 0.0 => Some(0.0),
        _ => None,
    }
}

fn parse_font_size(value: &str, parent_font_size: f32) -> Option<f32> {
    if let Some(pct) = value.trim().strip_suffix('%') {
        return pct.trim().parse::<f32>().ok().map(|pct| parent_font_size * pct / 100.0);
    }
    parse_length(value, parent_font_size).filter(|size| *size >= 0.0)
}

fn parse_line_height(value: &str, font_size: f32) -> Option<f32> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("normal") {
        return Some(DEFAULT_LINE_HEIGHT);
    }
    if let Ok(multiplier) = value.parse::<f32>() {
        return Some(multiplier);
    }
    if font_size <= 0.0 {
        return None;
    }
    parse_length(value, font_size).map(|px| px / font_size)
}

#[cfg(test)]
mod tests {
    use markup5ever::{LocalName, QualName, ns};

    use super::*;
    use crate::node::{Attribute, ElementData};

    fn element(tag: &str, style: &str) -> Node {
        let name = QualName::new(None, ns!(html), LocalName::from(tag));
        let attrs = vec![Attribute::new("style", style)];
        Node::new(1, NodeData::Element(ElementData::new(name, attrs)))
    }

    #[test]
    fn declarations_round_trip() {
        let mut decls = StyleDeclarations::parse("display:inline-block;overflow : hidden");
        decls.set("vertical-align", "top");
        decls.set("overflow", "visible");
        assert_eq!(
            decls.to_css_string(),
            "display: inline-block; overflow: visible; vertical-align: top;"
        );
    }

    #[test]
    fn inherit_takes_the_parent_display() {
        let root = ComputedStyle::root(DEFAULT_FONT_SIZE);
        let outer = ComputedStyle::resolve(&root, &element("span", "display: inline-block;"));
        let inner = ComputedStyle::resolve(&outer, &element("span", "display: inherit;"));
        assert_eq!(outer.display, DisplayMode::InlineBlock);
        assert_eq!(inner.display, DisplayMode::InlineBlock);
    }

    #[test]
    fn font_size_units() {
        let root = ComputedStyle::root(10.0);
        let px = ComputedStyle::resolve(&root, &element("p", "font-size: 20px"));
        let em = ComputedStyle::resolve(&px, &element("span", "font-size: 1.5em"));
        let pct = ComputedStyle::resolve(&px, &element("span", "font-size: 50%"));
        let bogus = ComputedStyle::resolve(&px, &element("span", "font-size: large"));
        assert_eq!(px.font_size, 20.0);
        assert_eq!(em.font_size, 30.0);
        assert_eq!(pct.font_size, 10.0);
        assert_eq!(bogus.font_size, 20.0);
    }

    #[test]
    fn tag_defaults() {
        let root = ComputedStyle::root(DEFAULT_FONT_SIZE);
        assert_eq!(ComputedStyle::resolve(&root, &element("div", "")).display, DisplayMode::Block);
        assert_eq!(ComputedStyle::resolve(&root, &element("em", "")).display, DisplayMode::Inline);
        assert_eq!(ComputedStyle::resolve(&root, &element("p", "display: none")).display, DisplayMode::None);
    }
}

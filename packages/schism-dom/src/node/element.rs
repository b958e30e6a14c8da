use markup5ever::QualName;

use super::{Attribute, Attributes};
use crate::style::StyleDeclarations;

#[derive(Debug, Clone)]
pub struct ElementData {
    /// The elements tag name, namespace and prefix
    pub name: QualName,

    /// The element's attributes
    pub attrs: Attributes,
}

impl ElementData {
    pub fn new(name: QualName, attrs: Vec<Attribute>) -> Self {
        ElementData {
            name,
            attrs: Attributes::new(attrs),
        }
    }

    pub fn attrs(&self) -> &[Attribute] {
        &self.attrs
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name)
    }

    /// Detects the presence of the attribute, treating *any* value as truthy.
    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.get(name).is_some()
    }

    pub fn local_name(&self) -> &str {
        &self.name.local
    }

    /// The declarations of the element's `style` attribute
    pub fn style_declarations(&self) -> StyleDeclarations {
        self.attr("style")
            .map(StyleDeclarations::parse)
            .unwrap_or_default()
    }

    /// Set a single declaration in the element's `style` attribute,
    /// leaving the other declarations untouched.
    pub fn set_style_property(&mut self, property: &str, value: &str) {
        let mut declarations = self.style_declarations();
        declarations.set(property, value);
        self.attrs.set("style", declarations.to_css_string());
    }

    pub fn style_property(&self, property: &str) -> Option<String> {
        self.style_declarations().get(property).map(str::to_string)
    }

    pub fn is_void(&self) -> bool {
        matches!(
            self.local_name(),
            "area"
                | "base"
                | "br"
                | "col"
                | "embed"
                | "hr"
                | "img"
                | "input"
                | "link"
                | "meta"
                | "source"
                | "track"
                | "wbr"
        )
    }

    /// Elements whose text children are serialized without escaping
    pub fn is_raw_text(&self) -> bool {
        matches!(
            self.local_name(),
            "style" | "script" | "xmp" | "iframe" | "noembed" | "noframes" | "plaintext"
        )
    }
}

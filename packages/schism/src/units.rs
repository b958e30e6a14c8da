//! Outer and inner boundary elements, and the word builder that uses them

use schism_dom::{Attribute, BaseDocument, DomError};
use schism_html::set_inner_html;

use crate::{Mutation, Overflow, SplitResult};

/// Attribute marking the boundary elements produced by a split
pub const SPLIT_ATTR: &str = "data-split";
pub const OUTER_MARKER: &str = "outer";
pub const INNER_MARKER: &str = "inner";

/// Detached template elements that boundaries are cloned from.
///
/// Created fresh for every rebuild and released once it is done.
#[derive(Debug)]
pub struct UnitTemplates {
    outer: usize,
    inner: usize,
}

impl UnitTemplates {
    pub fn new(doc: &mut BaseDocument, overflow: Overflow) -> Result<Self, DomError> {
        let mut mutator = doc.mutate();

        let outer =
            mutator.create_html_element("span", vec![Attribute::new(SPLIT_ATTR, OUTER_MARKER)]);
        mutator.set_style_property(outer, "display", "inline-block")?;
        mutator.set_style_property(outer, "overflow", "hidden")?;
        mutator.set_style_property(outer, "vertical-align", "top")?;

        let inner =
            mutator.create_html_element("span", vec![Attribute::new(SPLIT_ATTR, INNER_MARKER)]);
        mutator.set_style_property(inner, "display", "inherit")?;
        mutator.set_style_property(inner, "overflow", overflow.as_str())?;
        mutator.set_style_property(inner, "vertical-align", "inherit")?;

        Ok(Self { outer, inner })
    }

    /// A new, empty outer boundary
    pub fn outer(&self, doc: &mut BaseDocument) -> Result<usize, DomError> {
        doc.mutate().clone_node(self.outer)
    }

    /// A new inner boundary whose content is `markup`
    pub fn inner(&self, doc: &mut BaseDocument, markup: &str) -> Result<usize, DomError> {
        let inner = doc.mutate().clone_node(self.inner)?;
        if !markup.is_empty() {
            set_inner_html(doc, inner, markup)?;
        }
        Ok(inner)
    }

    pub fn release(self, doc: &mut BaseDocument) {
        let mut mutator = doc.mutate();
        mutator.remove_and_drop_node(self.outer);
        mutator.remove_and_drop_node(self.inner);
    }
}

/// Replace the host's children with one outer/inner pair per token.
///
/// Each outer boundary is followed by a single space text node.
pub fn build_words(
    doc: &mut BaseDocument,
    host: usize,
    tokens: &[&str],
    templates: &UnitTemplates,
) -> Result<SplitResult, DomError> {
    doc.mutate().remove_and_drop_children(host);

    let mut result = SplitResult::new(Mutation::Words);
    for token in tokens {
        let outer = templates.outer(doc)?;
        let inner = templates.inner(doc, token)?;

        let mut mutator = doc.mutate();
        mutator.append_children(outer, &[inner]);
        let space = mutator.create_text_node(" ");
        mutator.append_children(host, &[outer, space]);

        result.push_unit(inner);
        result.push_outer(outer);
    }
    Ok(result)
}

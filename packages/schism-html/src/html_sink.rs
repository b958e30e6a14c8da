//! An implementation for Html5ever's sink trait, allowing us to parse HTML into a DOM.

use std::borrow::Cow;
use std::cell::{Cell, Ref, RefCell, RefMut};

use html5ever::tendril::{StrTendril, TendrilSink};
use html5ever::tokenizer::TokenizerOpts;
use html5ever::tree_builder::{ElementFlags, NodeOrText, QuirksMode, TreeBuilderOpts, TreeSink};
use html5ever::{ParseOpts, QualName};
use markup5ever::interface::ElemName;
use markup5ever::{LocalName, Namespace, local_name, ns};
use schism_dom::node::Attribute;
use schism_dom::{BaseDocument, DocumentMutator};

/// Convert an html5ever Attribute which uses tendril for its value to a schism Attribute
/// which uses String.
fn html5ever_to_schism_attr(attr: html5ever::Attribute) -> Attribute {
    Attribute {
        name: attr.name,
        value: attr.value.to_string(),
    }
}

fn parse_opts() -> ParseOpts {
    ParseOpts {
        tokenizer: TokenizerOpts::default(),
        tree_builder: TreeBuilderOpts {
            scripting_enabled: false, // Enables parsing of <noscript> tags
            drop_doctype: true,
            ..Default::default()
        },
    }
}

/// Borrowed element name handed to the tree builder
#[derive(Debug)]
pub struct SinkElemName<'a>(Ref<'a, QualName>);

impl ElemName for SinkElemName<'_> {
    fn ns(&self) -> &Namespace {
        &self.0.ns
    }

    fn local_name(&self) -> &LocalName {
        &self.0.local
    }
}

/// What a finished parse leaves behind
pub struct ParseOutput {
    /// Every node created while parsing, in creation order
    pub created: Vec<usize>,
    /// Errors that occurred during parsing.
    pub errors: Vec<Cow<'static, str>>,
}

pub struct DocumentHtmlParser<'doc> {
    document_mutator: RefCell<DocumentMutator<'doc>>,

    /// The node the tree builder treats as the document
    document_id: usize,

    /// Errors that occurred during parsing.
    pub errors: RefCell<Vec<Cow<'static, str>>>,

    /// The document's quirks mode.
    pub quirks_mode: Cell<QuirksMode>,

    created: RefCell<Vec<usize>>,
}

impl<'doc> DocumentHtmlParser<'doc> {
    #[track_caller]
    /// Get a mutable borrow of the DocumentMutator
    fn mutr(&self) -> RefMut<'_, DocumentMutator<'doc>> {
        self.document_mutator.borrow_mut()
    }

    fn track(&self, id: usize) -> usize {
        self.created.borrow_mut().push(id);
        id
    }
}

impl DocumentHtmlParser<'_> {
    pub fn new(doc: &mut BaseDocument) -> DocumentHtmlParser<'_> {
        let document_id = doc.root_id();
        Self::with_document_node(doc, document_id)
    }

    /// A parser whose output is rooted at `document_id` instead of the real document node
    pub fn with_document_node(doc: &mut BaseDocument, document_id: usize) -> DocumentHtmlParser<'_> {
        DocumentHtmlParser {
            document_mutator: RefCell::new(doc.mutate()),
            document_id,
            errors: RefCell::new(Vec::new()),
            quirks_mode: Cell::new(QuirksMode::NoQuirks),
            created: RefCell::new(Vec::new()),
        }
    }

    pub fn parse_into_doc<'d>(doc: &'d mut BaseDocument, html: &str) -> &'d mut BaseDocument {
        let sink = Self::new(doc);
        html5ever::parse_document(sink, parse_opts()).one(StrTendril::from(html));
        doc
    }

    /// Parse `markup` as the contents of a `<div>` and append the result to `node_id`
    pub fn parse_fragment_into_node(doc: &mut BaseDocument, node_id: usize, markup: &str) {
        // The tree builder wants a document to hang an <html> root off.
        // A detached scratch node plays that part.
        let scratch = doc.mutate().create_html_element("template", Vec::new());

        let output = {
            let sink = Self::with_document_node(doc, scratch);
            let context = QualName::new(None, ns!(html), local_name!("div"));
            html5ever::parse_fragment(sink, parse_opts(), context, Vec::new(), false)
                .one(StrTendril::from(markup))
        };

        let html_root = doc
            .get_node(scratch)
            .and_then(|node| node.children.first().copied());

        let mut mutr = doc.mutate();
        if let Some(html_root) = html_root {
            mutr.reparent_children(html_root, node_id);
        }
        mutr.remove_and_drop_node(scratch);

        // The context element and anything the tree builder removed are left dangling
        for id in output.created {
            let orphaned = mutr
                .doc
                .get_node(id)
                .is_some_and(|node| node.parent.is_none());
            if orphaned && id != node_id {
                mutr.remove_and_drop_node(id);
            }
        }
    }
}

impl<'b> TreeSink for DocumentHtmlParser<'b> {
    type Output = ParseOutput;

    // we use the ID of the nodes in the tree as the handle
    type Handle = usize;

    type ElemName<'a>
        = SinkElemName<'a>
    where
        Self: 'a;

    fn finish(self) -> Self::Output {
        let errors = self.errors.into_inner();
        if !errors.is_empty() {
            tracing::debug!(count = errors.len(), "html parse errors");
            for error in &errors {
                tracing::trace!("html parse error: {error}");
            }
        }
        ParseOutput {
            created: self.created.into_inner(),
            errors,
        }
    }

    fn parse_error(&self, msg: Cow<'static, str>) {
        self.errors.borrow_mut().push(msg);
    }

    fn get_document(&self) -> Self::Handle {
        self.document_id
    }

    fn elem_name<'a>(&'a self, target: &'a Self::Handle) -> Self::ElemName<'a> {
        SinkElemName(Ref::map(self.document_mutator.borrow(), |mutr| {
            mutr.element_name(*target)
                .expect("TreeSink::elem_name called on a node which is not an element!")
        }))
    }

    fn create_element(
        &self,
        name: QualName,
        attrs: Vec<html5ever::Attribute>,
        _flags: ElementFlags,
    ) -> Self::Handle {
        let attrs = attrs.into_iter().map(html5ever_to_schism_attr).collect();
        let id = self.mutr().create_element(name, attrs);
        self.track(id)
    }

    fn create_comment(&self, text: StrTendril) -> Self::Handle {
        let id = self.mutr().create_comment_node(&text);
        self.track(id)
    }

    fn create_pi(&self, _target: StrTendril, data: StrTendril) -> Self::Handle {
        let id = self.mutr().create_comment_node(&data);
        self.track(id)
    }

    fn append(&self, parent_id: &Self::Handle, child: NodeOrText<Self::Handle>) {
        match child {
            NodeOrText::AppendNode(id) => self.mutr().append_children(*parent_id, &[id]),
            // If content to append is text, first attempt to append it to the last child of parent.
            // Else create a new text node and append it to the parent
            NodeOrText::AppendText(text) => {
                let last_child_id = self.mutr().last_child_id(*parent_id);
                let has_appended = if let Some(id) = last_child_id {
                    self.mutr().append_text_to_node(id, &text).is_ok()
                } else {
                    false
                };
                if !has_appended {
                    let new_child_id = self.mutr().create_text_node(&text);
                    self.track(new_child_id);
                    self.mutr().append_children(*parent_id, &[new_child_id]);
                }
            }
        }
    }

    // Note: The tree builder promises we won't have a text node after the insertion point.
    // https://github.com/servo/html5ever/blob/main/rcdom/lib.rs#L338
    fn append_before_sibling(&self, sibling_id: &Self::Handle, new_node: NodeOrText<Self::Handle>) {
        match new_node {
            NodeOrText::AppendNode(id) => self.mutr().insert_nodes_before(*sibling_id, &[id]),
            // If content to append is text, first attempt to append it to the node before sibling_node
            // Else create a new text node and insert it before sibling_node
            NodeOrText::AppendText(text) => {
                let previous_sibling_id = self.mutr().previous_sibling_id(*sibling_id);
                let has_appended = if let Some(id) = previous_sibling_id {
                    self.mutr().append_text_to_node(id, &text).is_ok()
                } else {
                    false
                };
                if !has_appended {
                    let new_child_id = self.mutr().create_text_node(&text);
                    self.track(new_child_id);
                    self.mutr()
                        .insert_nodes_before(*sibling_id, &[new_child_id]);
                }
            }
        };
    }

    fn append_based_on_parent_node(
        &self,
        element: &Self::Handle,
        prev_element: &Self::Handle,
        child: NodeOrText<Self::Handle>,
    ) {
        if self.mutr().node_has_parent(*element) {
            self.append_before_sibling(element, child);
        } else {
            self.append(prev_element, child);
        }
    }

    fn append_doctype_to_document(
        &self,
        _name: StrTendril,
        _public_id: StrTendril,
        _system_id: StrTendril,
    ) {
        // Ignore. We don't care about the DOCTYPE.
    }

    fn get_template_contents(&self, target: &Self::Handle) -> Self::Handle {
        // Template contents are parsed as ordinary children
        *target
    }

    fn same_node(&self, x: &Self::Handle, y: &Self::Handle) -> bool {
        x == y
    }

    fn set_quirks_mode(&self, mode: QuirksMode) {
        self.quirks_mode.set(mode);
    }

    fn add_attrs_if_missing(&self, target: &Self::Handle, attrs: Vec<html5ever::Attribute>) {
        let attrs = attrs.into_iter().map(html5ever_to_schism_attr).collect();
        self.mutr().add_attrs_if_missing(*target, attrs);
    }

    fn remove_from_parent(&self, target: &Self::Handle) {
        self.mutr().remove_node(*target);
    }

    fn reparent_children(&self, old_parent_id: &Self::Handle, new_parent_id: &Self::Handle) {
        self.mutr()
            .reparent_children(*old_parent_id, *new_parent_id);
    }
}

#[cfg(test)]
mod tests {
    use schism_dom::{BaseDocument, DocumentConfig};

    use super::DocumentHtmlParser;
    use crate::set_inner_html;

    #[test]
    fn parses_some_html() {
        let html = "<!DOCTYPE html><html><body><h1>hello world</h1></body></html>";
        let mut doc = BaseDocument::new(DocumentConfig::default());
        DocumentHtmlParser::parse_into_doc(&mut doc, html);

        let body = doc.body_id().expect("parsed document has a body");
        assert_eq!(doc.inner_html(body), "<h1>hello world</h1>");
        assert!(doc.is_attached(body));
    }

    #[test]
    fn fragments_leave_no_stray_nodes() {
        let mut doc = BaseDocument::new(DocumentConfig::default());
        let host = doc.mutate().create_html_element("span", vec![]);
        let before = doc.nodes.len();

        set_inner_html(&mut doc, host, "a <b>bold</b> c").unwrap();
        assert_eq!(doc.inner_html(host), "a <b>bold</b> c");
        // text, b, text inside b, text
        assert_eq!(doc.nodes.len(), before + 4);

        set_inner_html(&mut doc, host, "").unwrap();
        assert_eq!(doc.inner_html(host), "");
        assert_eq!(doc.nodes.len(), before);
    }
}

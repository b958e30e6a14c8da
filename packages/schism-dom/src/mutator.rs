use markup5ever::{LocalName, QualName, ns};

use crate::node::{Attribute, ElementData, NodeData, NodeFlags, TextNodeData};
use crate::{BaseDocument, DomError};

/// Structural and attribute mutations of a [`BaseDocument`].
///
/// Node ids passed to the tree operations must refer to live nodes.
pub struct DocumentMutator<'doc> {
    /// Document is public as an escape hatch, but users of this API should ideally avoid using it
    /// and prefer exposing additional functionality in DocumentMutator.
    pub doc: &'doc mut BaseDocument,
}

impl<'doc> DocumentMutator<'doc> {
    pub fn new(doc: &'doc mut BaseDocument) -> Self {
        Self { doc }
    }

    pub fn node_has_parent(&self, node_id: usize) -> bool {
        self.doc.nodes[node_id].parent.is_some()
    }

    pub fn previous_sibling_id(&self, node_id: usize) -> Option<usize> {
        let parent = self.doc.nodes[node_id].parent?;
        let siblings = &self.doc.nodes[parent].children;
        let idx = siblings.iter().position(|id| *id == node_id)?;
        idx.checked_sub(1).map(|prev| siblings[prev])
    }

    pub fn last_child_id(&self, node_id: usize) -> Option<usize> {
        self.doc.nodes[node_id].children.last().copied()
    }

    pub fn element_name(&self, node_id: usize) -> Option<&QualName> {
        self.doc
            .nodes
            .get(node_id)?
            .element_data()
            .map(|el| &el.name)
    }

    pub fn create_element(&mut self, name: QualName, attrs: Vec<Attribute>) -> usize {
        self.doc
            .create_node(NodeData::Element(ElementData::new(name, attrs)))
    }

    /// Create an element in the HTML namespace
    pub fn create_html_element(&mut self, tag: &str, attrs: Vec<Attribute>) -> usize {
        let name = QualName::new(None, ns!(html), LocalName::from(tag));
        self.create_element(name, attrs)
    }

    pub fn create_text_node(&mut self, text: &str) -> usize {
        self.doc
            .create_node(NodeData::Text(TextNodeData::new(text.to_string())))
    }

    pub fn create_comment_node(&mut self, text: &str) -> usize {
        self.doc.create_node(NodeData::Comment(text.to_string()))
    }

    /// Shallow copy of a node: same data, no children, detached.
    pub fn clone_node(&mut self, node_id: usize) -> Result<usize, DomError> {
        let node = self
            .doc
            .nodes
            .get(node_id)
            .ok_or(DomError::MissingNode(node_id))?;
        if matches!(node.data, NodeData::Document) {
            return Err(DomError::DocumentNode);
        }
        let data = node.data.clone();
        Ok(self.doc.create_node(data))
    }

    pub fn append_text_to_node(&mut self, node_id: usize, text: &str) -> Result<(), DomError> {
        let node = self
            .doc
            .nodes
            .get_mut(node_id)
            .ok_or(DomError::MissingNode(node_id))?;
        match &mut node.data {
            NodeData::Text(data) => {
                data.content.push_str(text);
                Ok(())
            }
            _ => Err(DomError::NotATextNode(node_id)),
        }
    }

    pub fn set_attribute(&mut self, node_id: usize, name: &str, value: &str) -> Result<(), DomError> {
        self.element_mut(node_id)?.attrs.set(name, value);
        Ok(())
    }

    pub fn set_style_property(
        &mut self,
        node_id: usize,
        property: &str,
        value: &str,
    ) -> Result<(), DomError> {
        self.element_mut(node_id)?.set_style_property(property, value);
        Ok(())
    }

    pub fn add_attrs_if_missing(&mut self, node_id: usize, attrs: Vec<Attribute>) {
        let Some(element) = self.doc.nodes[node_id].element_data_mut() else {
            return;
        };
        for attr in attrs {
            if !element.has_attr(&attr.name.local) {
                element.attrs.push(attr);
            }
        }
    }

    fn element_mut(&mut self, node_id: usize) -> Result<&mut ElementData, DomError> {
        self.doc
            .nodes
            .get_mut(node_id)
            .ok_or(DomError::MissingNode(node_id))?
            .element_data_mut()
            .ok_or(DomError::NotAnElement(node_id))
    }

    /// Append nodes to `parent_id`, detaching them from any previous parent first.
    pub fn append_children(&mut self, parent_id: usize, child_ids: &[usize]) {
        for &child_id in child_ids {
            self.detach(child_id);
            self.doc.nodes[child_id].parent = Some(parent_id);
            self.doc.nodes[parent_id].children.push(child_id);
        }
        self.sync_in_document(parent_id, child_ids);
    }

    /// Insert nodes immediately before `anchor_id` in its parent
    pub fn insert_nodes_before(&mut self, anchor_id: usize, new_node_ids: &[usize]) {
        let Some(parent_id) = self.doc.nodes[anchor_id].parent else {
            return;
        };
        for &new_id in new_node_ids {
            self.detach(new_id);
            let siblings = &mut self.doc.nodes[parent_id].children;
            let idx = siblings
                .iter()
                .position(|id| *id == anchor_id)
                .unwrap_or(siblings.len());
            siblings.insert(idx, new_id);
            self.doc.nodes[new_id].parent = Some(parent_id);
        }
        self.sync_in_document(parent_id, new_node_ids);
    }

    /// Move all children of `old_parent_id` to the end of `new_parent_id`
    pub fn reparent_children(&mut self, old_parent_id: usize, new_parent_id: usize) {
        let children = std::mem::take(&mut self.doc.nodes[old_parent_id].children);
        for &child in &children {
            self.doc.nodes[child].parent = None;
        }
        self.append_children(new_parent_id, &children);
    }

    /// Detach a node from its parent. The node (and its subtree) stays alive.
    pub fn remove_node(&mut self, node_id: usize) {
        self.detach(node_id);
        self.set_in_document_recursive(node_id, false);
    }

    /// Detach a node and free it together with all of its descendants
    pub fn remove_and_drop_node(&mut self, node_id: usize) {
        if node_id == self.doc.root_id() {
            return;
        }
        self.detach(node_id);
        for id in self.doc.descendants(node_id) {
            self.doc.nodes.remove(id);
        }
    }

    /// Free all of the node's children. Does nothing for a missing node.
    pub fn remove_and_drop_children(&mut self, node_id: usize) {
        let Some(node) = self.doc.nodes.get(node_id) else {
            return;
        };
        let children = node.children.clone();
        for child in children {
            self.remove_and_drop_node(child);
        }
    }

    fn detach(&mut self, node_id: usize) {
        let Some(parent_id) = self
            .doc
            .nodes
            .get_mut(node_id)
            .and_then(|node| node.parent.take())
        else {
            return;
        };
        self.doc.nodes[parent_id]
            .children
            .retain(|child| *child != node_id);
    }

    fn sync_in_document(&mut self, parent_id: usize, child_ids: &[usize]) {
        let in_document = self.doc.nodes[parent_id].flags.is_in_document();
        for &child_id in child_ids {
            self.set_in_document_recursive(child_id, in_document);
        }
    }

    fn set_in_document_recursive(&mut self, node_id: usize, in_document: bool) {
        for id in self.doc.descendants(node_id) {
            let node = &mut self.doc.nodes[id];
            node.flags.set(NodeFlags::IS_IN_DOCUMENT, in_document);
            if !in_document {
                node.final_layout = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{BaseDocument, DocumentConfig, DomError};

    #[test]
    fn attachment_follows_the_subtree() {
        let mut doc = BaseDocument::new(DocumentConfig::default());
        let root = doc.root_id();
        let mut mutr = doc.mutate();
        let outer = mutr.create_html_element("span", vec![]);
        let inner = mutr.create_html_element("span", vec![]);
        let text = mutr.create_text_node("hi");
        mutr.append_children(inner, &[text]);
        mutr.append_children(outer, &[inner]);
        drop(mutr);
        assert!(!doc.is_attached(text));

        doc.mutate().append_children(root, &[outer]);
        assert!(doc.is_attached(outer));
        assert!(doc.is_attached(text));

        doc.mutate().remove_node(inner);
        assert!(doc.is_attached(outer));
        assert!(!doc.is_attached(inner));
        assert!(!doc.is_attached(text));
        assert!(doc.get_node(text).is_some(), "removed nodes stay alive");
    }

    #[test]
    fn drop_frees_the_whole_subtree() {
        let mut doc = BaseDocument::new(DocumentConfig::default());
        let root = doc.root_id();
        let mut mutr = doc.mutate();
        let outer = mutr.create_html_element("span", vec![]);
        let text = mutr.create_text_node("hi");
        mutr.append_children(outer, &[text]);
        mutr.append_children(root, &[outer]);
        mutr.remove_and_drop_children(root);
        drop(mutr);

        assert!(doc.root_node().children.is_empty());
        assert!(doc.get_node(outer).is_none());
        assert!(doc.get_node(text).is_none());
        assert_eq!(doc.nodes.len(), 1);

        let mut mutr = doc.mutate();
        mutr.remove_and_drop_children(outer);
        mutr.remove_and_drop_node(outer);
        assert_eq!(mutr.doc.nodes.len(), 1, "dropping a freed node is a no-op");
    }

    #[test]
    fn append_moves_nodes_between_parents() {
        let mut doc = BaseDocument::new(DocumentConfig::default());
        let mut mutr = doc.mutate();
        let a = mutr.create_html_element("div", vec![]);
        let b = mutr.create_html_element("div", vec![]);
        let x = mutr.create_text_node("x");
        let y = mutr.create_text_node("y");
        mutr.append_children(a, &[x, y]);
        mutr.insert_nodes_before(x, &[y]);
        assert_eq!(mutr.doc.nodes[a].children, vec![y, x]);
        assert_eq!(mutr.previous_sibling_id(x), Some(y));

        mutr.reparent_children(a, b);
        assert!(mutr.doc.nodes[a].children.is_empty());
        assert_eq!(mutr.doc.nodes[b].children, vec![y, x]);
        assert_eq!(mutr.doc.nodes[x].parent, Some(b));
    }

    #[test]
    fn clone_node_is_shallow() {
        let mut doc = BaseDocument::new(DocumentConfig::default());
        let mut mutr = doc.mutate();
        let span = mutr.create_html_element("span", vec![]);
        mutr.set_style_property(span, "display", "inline-block").unwrap();
        let text = mutr.create_text_node("x");
        mutr.append_children(span, &[text]);

        mutr.set_attribute(span, "data-split", "outer").unwrap();
        assert_eq!(
            mutr.set_attribute(text, "data-split", "inner"),
            Err(DomError::NotAnElement(text))
        );

        let copy = mutr.clone_node(span).unwrap();
        assert!(mutr.doc.nodes[copy].children.is_empty());
        assert_eq!(
            mutr.doc.nodes[copy].attr("style"),
            Some("display: inline-block;")
        );
        assert_eq!(mutr.doc.nodes[copy].attr("data-split"), Some("outer"));
        assert!(mutr.clone_node(0).is_err());
    }
}

//! Immutable structural copies of subtrees.
//!
//! A [`SnapshotNode`] owns no document state, so it can outlive the nodes it
//! was taken from and be re-instantiated any number of times.

use markup5ever::QualName;

use crate::node::{Attribute, NodeData};
use crate::{BaseDocument, DocumentMutator, DomError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotNode {
    Element {
        name: QualName,
        attrs: Vec<Attribute>,
        children: Vec<SnapshotNode>,
    },
    Text(String),
    Comment(String),
}

impl SnapshotNode {
    /// Number of nodes in this snapshot, including itself
    pub fn node_count(&self) -> usize {
        match self {
            SnapshotNode::Element { children, .. } => {
                1 + children.iter().map(SnapshotNode::node_count).sum::<usize>()
            }
            SnapshotNode::Text(_) | SnapshotNode::Comment(_) => 1,
        }
    }
}

impl BaseDocument {
    /// Deep structural copy of the node and its descendants
    pub fn snapshot_subtree(&self, node_id: usize) -> Result<SnapshotNode, DomError> {
        let node = self.get_node(node_id).ok_or(DomError::MissingNode(node_id))?;
        Ok(match &node.data {
            NodeData::Document => return Err(DomError::DocumentNode),
            NodeData::Text(text) => SnapshotNode::Text(text.content.clone()),
            NodeData::Comment(text) => SnapshotNode::Comment(text.clone()),
            NodeData::Element(element) => SnapshotNode::Element {
                name: element.name.clone(),
                attrs: element.attrs.to_vec(),
                children: node
                    .children
                    .iter()
                    .map(|child| self.snapshot_subtree(*child))
                    .collect::<Result<_, _>>()?,
            },
        })
    }
}

impl DocumentMutator<'_> {
    /// Build fresh, detached nodes from a snapshot. Returns the new subtree's root.
    pub fn instantiate_snapshot(&mut self, snapshot: &SnapshotNode) -> usize {
        match snapshot {
            SnapshotNode::Text(text) => self.create_text_node(text),
            SnapshotNode::Comment(text) => self.create_comment_node(text),
            SnapshotNode::Element {
                name,
                attrs,
                children,
            } => {
                let id = self.create_element(name.clone(), attrs.clone());
                let child_ids: Vec<usize> = children
                    .iter()
                    .map(|child| self.instantiate_snapshot(child))
                    .collect();
                self.append_children(id, &child_ids);
                id
            }
        }
    }
}

use bitflags::bitflags;

use super::ElementData;

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct NodeFlags: u32 {
        /// Whether the node is in the document
        const IS_IN_DOCUMENT = 0b00000001;
    }
}

impl NodeFlags {
    #[inline(always)]
    pub fn is_in_document(&self) -> bool {
        self.contains(Self::IS_IN_DOCUMENT)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    Element,
    Text,
    Comment,
}

#[derive(Debug, Clone)]
pub enum NodeData {
    /// The `Document` itself - the root node of a HTML document.
    Document,

    /// An element with attributes.
    Element(ElementData),

    /// A text node.
    Text(TextNodeData),

    /// A comment.
    Comment(String),
}

impl NodeData {
    pub fn downcast_element(&self) -> Option<&ElementData> {
        match self {
            Self::Element(data) => Some(data),
            _ => None,
        }
    }

    pub fn downcast_element_mut(&mut self) -> Option<&mut ElementData> {
        match self {
            Self::Element(data) => Some(data),
            _ => None,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            NodeData::Document => NodeKind::Document,
            NodeData::Element(_) => NodeKind::Element,
            NodeData::Text(_) => NodeKind::Text,
            NodeData::Comment(_) => NodeKind::Comment,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextNodeData {
    /// The textual content of the text node
    pub content: String,
}

impl TextNodeData {
    pub fn new(content: String) -> Self {
        Self { content }
    }
}

/// The box computed for a node by the most recent layout pass.
///
/// `x` and `y` are relative to the parent node's box.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NodeLayout {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone)]
pub struct Node {
    /// Our Id
    pub id: usize,
    /// Our parent's ID
    pub parent: Option<usize>,
    // What are our children?
    pub children: Vec<usize>,

    /// Node type (Element, TextNode, etc) specific data
    pub data: NodeData,

    pub flags: NodeFlags,

    /// Set by the last layout pass. `None` if the node was not laid out.
    pub final_layout: Option<NodeLayout>,
}

impl Node {
    pub(crate) fn new(id: usize, data: NodeData) -> Self {
        Self {
            id,
            parent: None,
            children: Vec::new(),
            data,
            flags: NodeFlags::empty(),
            final_layout: None,
        }
    }

    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element(_))
    }

    pub fn is_text_node(&self) -> bool {
        matches!(self.data, NodeData::Text(_))
    }

    pub fn element_data(&self) -> Option<&ElementData> {
        self.data.downcast_element()
    }

    pub fn element_data_mut(&mut self) -> Option<&mut ElementData> {
        self.data.downcast_element_mut()
    }

    pub fn text_data(&self) -> Option<&TextNodeData> {
        match &self.data {
            NodeData::Text(data) => Some(data),
            _ => None,
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.element_data()?.attr(name)
    }

    pub fn is_in_document(&self) -> bool {
        self.flags.is_in_document()
    }

    pub fn node_debug_str(&self) -> String {
        match &self.data {
            NodeData::Document => "DOCUMENT".to_string(),
            NodeData::Element(data) => {
                let mut s = format!("<{}", data.name.local);
                if let Some(id) = data.attr("id") {
                    s.push_str(&format!(" #{id}"));
                }
                if let Some(split) = data.attr("data-split") {
                    s.push_str(&format!(" [{split}]"));
                }
                s.push('>');
                s
            }
            NodeData::Text(data) => format!("{:?}", data.content),
            NodeData::Comment(_) => "COMMENT".to_string(),
        }
    }
}

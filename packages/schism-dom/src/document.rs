use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use schism_traits::{ResizeEvent, Viewport};
use slab::Slab;
use tokio::sync::mpsc::UnboundedSender;

use crate::layout::{MonospaceMeasurer, TextMeasurer};
use crate::node::{NodeData, NodeFlags};
use crate::resize::ResizeObservation;
use crate::style::{ComputedStyle, DEFAULT_FONT_SIZE};
use crate::{DocumentConfig, DocumentMutator, Node};

pub struct BaseDocument {
    /// ID of the document
    id: usize,

    // Viewport details such as the dimensions and HiDPI scale
    pub(crate) viewport: Viewport,

    /// A slab-backed tree of nodes
    ///
    /// Node 0 is always the `Document` node. Removed nodes free their slot,
    /// so ids are only stable while the node is alive.
    pub nodes: Box<Slab<Node>>,

    /// Font size inherited by the document root
    pub(crate) default_font_size: f32,
    /// Measures text runs for the layout pass
    pub(crate) text_measurer: Arc<dyn TextMeasurer>,

    /// Window-level resize listeners
    pub(crate) resize_listeners: Slab<UnboundedSender<ResizeEvent>>,
    /// Per-node resize observers
    pub(crate) resize_observers: Slab<ResizeObservation>,
}

impl BaseDocument {
    /// Create a new (empty) [`BaseDocument`] with the specified configuration
    pub fn new(config: DocumentConfig) -> Self {
        static ID_GENERATOR: AtomicUsize = AtomicUsize::new(1);

        let id = ID_GENERATOR.fetch_add(1, Ordering::SeqCst);
        let text_measurer = config
            .text_measurer
            .unwrap_or_else(|| Arc::new(MonospaceMeasurer::default()));

        let mut doc = Self {
            id,
            viewport: config.viewport.unwrap_or_default(),
            nodes: Box::new(Slab::new()),
            default_font_size: config.default_font_size.unwrap_or(DEFAULT_FONT_SIZE),
            text_measurer,
            resize_listeners: Slab::new(),
            resize_observers: Slab::new(),
        };

        // Initialise document with root Document node
        doc.create_node(NodeData::Document);
        doc.root_node_mut().flags.insert(NodeFlags::IS_IN_DOCUMENT);

        doc
    }

    /// Get the [`BaseDocument`]'s id
    pub fn id(&self) -> usize {
        self.id
    }

    pub(crate) fn create_node(&mut self, node_data: NodeData) -> usize {
        let entry = self.nodes.vacant_entry();
        let id = entry.key();
        entry.insert(Node::new(id, node_data));
        id
    }

    /// Obtain a [`DocumentMutator`] for mutating the tree
    pub fn mutate(&mut self) -> DocumentMutator<'_> {
        DocumentMutator::new(self)
    }

    pub fn root_id(&self) -> usize {
        0
    }

    pub fn root_node(&self) -> &Node {
        &self.nodes[0]
    }

    pub fn root_node_mut(&mut self) -> &mut Node {
        &mut self.nodes[0]
    }

    pub fn get_node(&self, node_id: usize) -> Option<&Node> {
        self.nodes.get(node_id)
    }

    pub fn get_node_mut(&mut self, node_id: usize) -> Option<&mut Node> {
        self.nodes.get_mut(node_id)
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn default_font_size(&self) -> f32 {
        self.default_font_size
    }

    /// Whether the node can be reached from the document root
    pub fn is_attached(&self, node_id: usize) -> bool {
        self.get_node(node_id)
            .is_some_and(|node| node.flags.is_in_document())
    }

    /// The ids of `node_id`'s element children, in order
    pub fn element_children(&self, node_id: usize) -> Vec<usize> {
        self.get_node(node_id)
            .map(|node| {
                node.children
                    .iter()
                    .copied()
                    .filter(|child| self.nodes[*child].is_element())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Pre-order traversal of `node_id` and its descendants
    pub fn descendants(&self, node_id: usize) -> Vec<usize> {
        let mut out = Vec::new();
        let mut stack = vec![node_id];
        while let Some(id) = stack.pop() {
            let Some(node) = self.get_node(id) else {
                continue;
            };
            out.push(id);
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }

    /// Find an element by its `id` attribute
    pub fn get_element_by_id(&self, id: &str) -> Option<usize> {
        self.descendants(self.root_id())
            .into_iter()
            .find(|node_id| self.nodes[*node_id].attr("id") == Some(id))
    }

    fn child_element_named(&self, parent: usize, name: &str) -> Option<usize> {
        self.element_children(parent).into_iter().find(|child| {
            self.nodes[*child]
                .element_data()
                .is_some_and(|el| el.local_name() == name)
        })
    }

    /// The `<body>` element, if the document has the usual `html > body` shape
    pub fn body_id(&self) -> Option<usize> {
        let html = self.child_element_named(self.root_id(), "html")?;
        self.child_element_named(html, "body")
    }

    /// The concatenated text of the node's descendant text nodes
    pub fn text_content(&self, node_id: usize) -> String {
        let mut out = String::new();
        for id in self.descendants(node_id) {
            if let Some(text) = self.nodes[id].text_data() {
                out.push_str(&text.content);
            }
        }
        out
    }

    /// Resolve the node's style by inheriting down from the document root.
    ///
    /// Returns `None` for nodes that are not attached to the document.
    pub fn computed_style(&self, node_id: usize) -> Option<ComputedStyle> {
        if !self.is_attached(node_id) {
            return None;
        }

        let mut chain = vec![node_id];
        let mut current = self.nodes[node_id].parent;
        while let Some(id) = current {
            chain.push(id);
            current = self.nodes[id].parent;
        }

        let root = ComputedStyle::root(self.default_font_size);
        Some(
            chain
                .iter()
                .rev()
                .fold(root, |parent, id| ComputedStyle::resolve(&parent, &self.nodes[*id])),
        )
    }

    /// Position of the node's box relative to the document origin.
    ///
    /// `None` unless the node and all of its ancestors were laid out by the
    /// last layout pass.
    pub fn absolute_position(&self, node_id: usize) -> Option<(f32, f32)> {
        let mut x = 0.0;
        let mut y = 0.0;
        let mut current = Some(node_id);
        while let Some(id) = current {
            let node = self.get_node(id)?;
            let layout = node.final_layout?;
            x += layout.x;
            y += layout.y;
            current = node.parent;
        }
        Some((x, y))
    }
}

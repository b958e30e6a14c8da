use crate::BaseDocument;

impl BaseDocument {
    /// Render the tree below `node_id` as an indented outline
    pub fn tree_string(&self, node_id: usize) -> String {
        let mut out = String::new();
        self.write_tree(node_id, 0, &mut out);
        out
    }

    fn write_tree(&self, node_id: usize, depth: usize, out: &mut String) {
        let Some(node) = self.get_node(node_id) else {
            return;
        };
        out.push_str(&"  ".repeat(depth));
        out.push_str(&node.node_debug_str());
        if let Some(layout) = node.final_layout {
            out.push_str(&format!(
                " ({}, {}) {}x{}",
                layout.x, layout.y, layout.width, layout.height
            ));
        }
        out.push('\n');
        for &child in &node.children {
            self.write_tree(child, depth + 1, out);
        }
    }

    pub fn print_tree(&self) {
        println!("{}", self.tree_string(self.root_id()));
    }
}

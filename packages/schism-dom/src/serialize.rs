//! HTML serialization of subtrees, the counterpart of `innerHTML`/`outerHTML`.

use crate::BaseDocument;
use crate::node::NodeData;

impl BaseDocument {
    /// Serialize the node's children
    pub fn inner_html(&self, node_id: usize) -> String {
        let mut out = String::new();
        if let Some(node) = self.get_node(node_id) {
            let raw = node.element_data().is_some_and(|el| el.is_raw_text());
            for &child in &node.children {
                self.write_node(child, raw, &mut out);
            }
        }
        out
    }

    /// Serialize the node itself, including its children
    pub fn outer_html(&self, node_id: usize) -> String {
        let mut out = String::new();
        self.write_node(node_id, false, &mut out);
        out
    }

    fn write_node(&self, node_id: usize, raw_text_parent: bool, out: &mut String) {
        let Some(node) = self.get_node(node_id) else {
            return;
        };
        match &node.data {
            NodeData::Document => {
                for &child in &node.children {
                    self.write_node(child, false, out);
                }
            }
            NodeData::Text(text) => {
                if raw_text_parent {
                    out.push_str(&text.content);
                } else {
                    push_escaped(out, &html_escape::encode_text(&text.content));
                }
            }
            NodeData::Comment(text) => {
                out.push_str("<!--");
                out.push_str(text);
                out.push_str("-->");
            }
            NodeData::Element(element) => {
                out.push('<');
                out.push_str(element.local_name());
                for attr in element.attrs() {
                    out.push(' ');
                    out.push_str(&attr.name.local);
                    out.push_str("=\"");
                    push_escaped(out, &html_escape::encode_double_quoted_attribute(&attr.value));
                    out.push('"');
                }
                out.push('>');
                if element.is_void() {
                    return;
                }
                let raw = element.is_raw_text();
                for &child in &node.children {
                    self.write_node(child, raw, out);
                }
                out.push_str("</");
                out.push_str(element.local_name());
                out.push('>');
            }
        }
    }
}

/// Append already escaped text, writing U+00A0 as `&nbsp;` like browsers do
fn push_escaped(out: &mut String, escaped: &str) {
    for (i, part) in escaped.split('\u{a0}').enumerate() {
        if i > 0 {
            out.push_str("&nbsp;");
        }
        out.push_str(part);
    }
}

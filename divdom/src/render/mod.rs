//! Markup serialisation of a document subtree.
//!
//! Inline text is emitted verbatim (it may itself be markup), ahead of the
//! element children, so `inner_markup` of a node reads like its `innerHTML`.

use crate::document::{Document, DocumentInner};
use crate::element::{Node, NodeId};

/// Markup for the node itself and its subtree. Empty for unknown nodes.
pub fn outer_markup(doc: &Document, id: NodeId) -> String {
    let inner = doc.read_inner();
    let mut out = String::new();
    write_node(&inner, id, &mut out);
    out
}

/// Markup for the node's content only.
pub fn inner_markup(doc: &Document, id: NodeId) -> String {
    let inner = doc.read_inner();
    let mut out = String::new();
    if let Some(node) = inner.nodes.get(&id) {
        write_content(&inner, node, &mut out);
    }
    out
}

fn write_node(inner: &DocumentInner, id: NodeId, out: &mut String) {
    let Some(node) = inner.nodes.get(&id) else {
        return;
    };

    out.push('<');
    out.push_str(&node.tag);
    if !node.class_name.is_empty() {
        out.push_str(&format!(" class=\"{}\"", escape_attribute(&node.class_name)));
    }
    if !node.style.is_empty() {
        out.push_str(&format!(" style=\"{}\"", escape_attribute(&node.style.css_text())));
    }

    let mut attributes: Vec<_> = node.attributes.iter().collect();
    attributes.sort();
    for (name, value) in attributes {
        out.push_str(&format!(" {name}=\"{}\"", escape_attribute(value)));
    }
    out.push('>');

    write_content(inner, node, out);

    out.push_str(&format!("</{}>", node.tag));
}

fn write_content(inner: &DocumentInner, node: &Node, out: &mut String) {
    out.push_str(&node.text);
    for child in &node.children {
        write_node(inner, *child, out);
    }
}

fn escape_attribute(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
}

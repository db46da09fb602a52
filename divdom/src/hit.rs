use crate::document::{Document, DocumentInner};
use crate::element::NodeId;

/// Find the deepest rendered node whose layout box contains the point.
///
/// Subtrees with `display: none` are skipped entirely; a node with
/// `visibility: hidden` cannot be hit itself but its children still can.
/// Later siblings are treated as painted on top of earlier ones.
pub fn hit_test(doc: &Document, x: i32, y: i32) -> Option<NodeId> {
    let inner = doc.read_inner();
    hit_test_node(&inner, inner.root, x, y)
}

fn hit_test_node(inner: &DocumentInner, id: NodeId, x: i32, y: i32) -> Option<NodeId> {
    let node = inner.nodes.get(&id)?;
    if node.is_display_none() {
        return None;
    }

    // Children are checked regardless of the parent's box: absolutely
    // positioned overlays often sit outside it.
    for child in node.children.iter().rev() {
        if let Some(hit) = hit_test_node(inner, *child, x, y) {
            return Some(hit);
        }
    }

    if !node.is_visibility_hidden() && !node.layout.is_empty() && node.layout.contains(x, y) {
        Some(id)
    } else {
        None
    }
}

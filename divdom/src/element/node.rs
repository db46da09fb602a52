use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::layout::Rect;
use crate::types::StyleMap;

/// Handle to a node in a [`Document`](crate::Document).
///
/// Ids are allocated from a process-wide counter, so an id from one document
/// is never mistaken for a node of another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub(crate) fn next() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__node_{}", self.0)
    }
}

/// A single display element.
#[derive(Debug, Clone)]
pub struct Node {
    // Identity
    pub id: NodeId,
    pub tag: String,

    // Tree
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,

    // Presentation
    pub style: StyleMap,
    pub class_name: String,
    /// Inline text or markup rendered ahead of the element children.
    pub text: String,
    pub attributes: HashMap<String, String>,

    /// Offset box last reported by the host.
    pub layout: Rect,
}

impl Node {
    pub(crate) fn new(tag: impl Into<String>) -> Self {
        Self {
            id: NodeId::next(),
            tag: tag.into().to_ascii_lowercase(),
            parent: None,
            children: Vec::new(),
            style: StyleMap::new(),
            class_name: String::new(),
            text: String::new(),
            attributes: HashMap::new(),
            layout: Rect::default(),
        }
    }

    /// Whether the node generates no box (`display: none`).
    pub fn is_display_none(&self) -> bool {
        self.style.get("display") == Some("none")
    }

    pub fn is_visibility_hidden(&self) -> bool {
        self.style.get("visibility") == Some("hidden")
    }
}

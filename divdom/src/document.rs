//! The document: an arena of display nodes with tree, style and event APIs.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};

use log::{trace, warn};

use crate::element::{Node, NodeId};
use crate::error::DomError;
use crate::event::{DomEvent, EventKind, Handler, ListenerId, Subscription};
use crate::hit::hit_test;
use crate::layout::Rect;
use crate::types::StyleMap;

struct Listener {
    id: ListenerId,
    node: NodeId,
    kind: EventKind,
    handler: Handler,
}

pub(crate) struct DocumentInner {
    pub(crate) nodes: HashMap<NodeId, Node>,
    pub(crate) root: NodeId,
    body: NodeId,
    listeners: Vec<Listener>,
}

impl DocumentInner {
    fn node(&self, id: NodeId) -> Result<&Node, DomError> {
        self.nodes.get(&id).ok_or(DomError::UnknownNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, DomError> {
        self.nodes.get_mut(&id).ok_or(DomError::UnknownNode(id))
    }

    /// True if `node` is `ancestor` or lies below it.
    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes.get(&id).and_then(|n| n.parent);
        }
        false
    }

    /// Unlink `child` from its parent, if it has one.
    fn unlink(&mut self, child: NodeId) -> Option<NodeId> {
        let parent = self.nodes.get_mut(&child)?.parent.take()?;
        if let Some(p) = self.nodes.get_mut(&parent) {
            p.children.retain(|c| *c != child);
        }
        Some(parent)
    }
}

/// A shared handle to a display tree.
///
/// Cloning the handle is cheap; all clones see the same nodes. No lock is
/// held while event listeners run, so listeners may freely mutate the
/// document they were dispatched from.
#[derive(Clone)]
pub struct Document {
    inner: Arc<RwLock<DocumentInner>>,
}

/// Non-owning handle to a [`Document`].
#[derive(Clone)]
pub struct WeakDocument(Weak<RwLock<DocumentInner>>);

impl WeakDocument {
    pub fn upgrade(&self) -> Option<Document> {
        self.0.upgrade().map(|inner| Document { inner })
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document with an `html` root and a `body` child.
    pub fn new() -> Self {
        let mut root = Node::new("html");
        let mut body = Node::new("body");
        body.parent = Some(root.id);
        root.children.push(body.id);

        let (root_id, body_id) = (root.id, body.id);
        let mut nodes = HashMap::new();
        nodes.insert(root_id, root);
        nodes.insert(body_id, body);

        Self {
            inner: Arc::new(RwLock::new(DocumentInner {
                nodes,
                root: root_id,
                body: body_id,
                listeners: Vec::new(),
            })),
        }
    }

    pub fn downgrade(&self) -> WeakDocument {
        WeakDocument(Arc::downgrade(&self.inner))
    }

    /// Whether both handles refer to the same document.
    pub fn ptr_eq(&self, other: &Document) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn read_inner(&self) -> RwLockReadGuard<'_, DocumentInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_inner(&self) -> RwLockWriteGuard<'_, DocumentInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn update(&self, id: NodeId, f: impl FnOnce(&mut Node)) {
        match self.write_inner().nodes.get_mut(&id) {
            Some(node) => f(node),
            None => warn!("ignoring update of unknown node {id}"),
        }
    }

    // -------------------------------------------------------------------------
    // Nodes
    // -------------------------------------------------------------------------

    /// The document element (`html`).
    pub fn root(&self) -> NodeId {
        self.read_inner().root
    }

    pub fn body(&self) -> NodeId {
        self.read_inner().body
    }

    /// Create a detached element of the given kind.
    pub fn create_element(&self, tag: &str) -> NodeId {
        let node = Node::new(tag);
        let id = node.id;
        self.write_inner().nodes.insert(id, node);
        id
    }

    pub fn has_node(&self, id: NodeId) -> bool {
        self.read_inner().nodes.contains_key(&id)
    }

    pub fn node_count(&self) -> usize {
        self.read_inner().nodes.len()
    }

    /// Snapshot of a node.
    pub fn node(&self, id: NodeId) -> Option<Node> {
        self.read_inner().nodes.get(&id).cloned()
    }

    /// Read a node in place.
    pub fn with_node<R>(&self, id: NodeId, f: impl FnOnce(&Node) -> R) -> Option<R> {
        self.read_inner().nodes.get(&id).map(f)
    }

    pub fn tag(&self, id: NodeId) -> Option<String> {
        self.with_node(id, |n| n.tag.clone())
    }

    // -------------------------------------------------------------------------
    // Tree
    // -------------------------------------------------------------------------

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.with_node(id, |n| n.parent).flatten()
    }

    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.with_node(id, |n| n.children.clone())
            .unwrap_or_default()
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.with_node(id, |n| n.children.first().copied()).flatten()
    }

    /// True if `node` is `ancestor` itself or one of its descendants.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.read_inner().contains(ancestor, node)
    }

    /// Whether the node is attached below the document root.
    pub fn is_connected(&self, id: NodeId) -> bool {
        let inner = self.read_inner();
        inner.contains(inner.root, id)
    }

    /// Move `child` to the end of `parent`'s children.
    pub fn append_child(&self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.insert_before(parent, child, None)
    }

    /// Insert `child` into `parent` ahead of `reference`, or at the end when
    /// `reference` is `None`. The child is first detached from wherever it is.
    pub fn insert_before(
        &self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> Result<(), DomError> {
        let mut inner = self.write_inner();
        inner.node(parent)?;
        inner.node(child)?;
        if let Some(reference) = reference {
            if inner.node(reference)?.parent != Some(parent) {
                return Err(DomError::NotAChild {
                    parent,
                    child: reference,
                });
            }
            if reference == child {
                return Ok(());
            }
        }
        if inner.contains(child, parent) {
            return Err(DomError::HierarchyRequest { parent, child });
        }

        inner.unlink(child);
        let parent_node = inner.node_mut(parent)?;
        let index = reference
            .and_then(|r| parent_node.children.iter().position(|c| *c == r))
            .unwrap_or(parent_node.children.len());
        parent_node.children.insert(index, child);
        inner.node_mut(child)?.parent = Some(parent);
        Ok(())
    }

    pub fn remove_child(&self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        let mut inner = self.write_inner();
        inner.node(parent)?;
        if inner.node(child)?.parent != Some(parent) {
            return Err(DomError::NotAChild { parent, child });
        }
        inner.unlink(child);
        Ok(())
    }

    /// Detach a node from its parent. Returns the former parent.
    pub fn detach(&self, id: NodeId) -> Result<Option<NodeId>, DomError> {
        let mut inner = self.write_inner();
        inner.node(id)?;
        Ok(inner.unlink(id))
    }

    /// Detach every child of `id`, returning them in their former order.
    pub fn clear_children(&self, id: NodeId) -> Result<Vec<NodeId>, DomError> {
        let mut inner = self.write_inner();
        let children = std::mem::take(&mut inner.node_mut(id)?.children);
        for child in &children {
            if let Some(node) = inner.nodes.get_mut(child) {
                node.parent = None;
            }
        }
        Ok(children)
    }

    // -------------------------------------------------------------------------
    // Style, text and attributes
    // -------------------------------------------------------------------------

    /// Set one inline style property. An empty value removes it.
    pub fn set_style(&self, id: NodeId, property: &str, value: &str) {
        self.update(id, |n| n.style.set(property, value));
    }

    pub fn style(&self, id: NodeId, property: &str) -> Option<String> {
        self.with_node(id, |n| n.style.get(property).map(str::to_string))
            .flatten()
    }

    pub fn remove_style(&self, id: NodeId, property: &str) -> Option<String> {
        let mut removed = None;
        self.update(id, |n| removed = n.style.remove(property));
        removed
    }

    pub fn css_text(&self, id: NodeId) -> String {
        self.with_node(id, |n| n.style.css_text()).unwrap_or_default()
    }

    /// Replace every inline style declaration.
    pub fn set_css_text(&self, id: NodeId, css_text: &str) {
        let style = StyleMap::parse(css_text);
        self.update(id, |n| n.style = style);
    }

    pub fn set_class_name(&self, id: NodeId, class_name: &str) {
        self.update(id, |n| n.class_name = class_name.trim().to_string());
    }

    pub fn class_name(&self, id: NodeId) -> String {
        self.with_node(id, |n| n.class_name.clone())
            .unwrap_or_default()
    }

    /// Replace the node's content with inline text or markup.
    /// Element children are detached.
    pub fn set_text(&self, id: NodeId, text: &str) {
        let mut inner = self.write_inner();
        let Some(node) = inner.nodes.get_mut(&id) else {
            warn!("ignoring set_text on unknown node {id}");
            return;
        };
        node.text = text.to_string();
        let children = std::mem::take(&mut node.children);
        for child in children {
            if let Some(node) = inner.nodes.get_mut(&child) {
                node.parent = None;
            }
        }
    }

    pub fn text(&self, id: NodeId) -> String {
        self.with_node(id, |n| n.text.clone()).unwrap_or_default()
    }

    pub fn set_attribute(&self, id: NodeId, name: &str, value: &str) {
        self.update(id, |n| {
            n.attributes.insert(name.to_string(), value.to_string());
        });
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<String> {
        self.with_node(id, |n| n.attributes.get(name).cloned())
            .flatten()
    }

    pub fn remove_attribute(&self, id: NodeId, name: &str) -> Option<String> {
        let mut removed = None;
        self.update(id, |n| removed = n.attributes.remove(name));
        removed
    }

    // -------------------------------------------------------------------------
    // Metrics
    // -------------------------------------------------------------------------

    /// Record the offset box the host computed for a node.
    pub fn set_layout(&self, id: NodeId, rect: Rect) {
        self.update(id, |n| n.layout = rect);
    }

    pub fn layout(&self, id: NodeId) -> Rect {
        self.with_node(id, |n| n.layout).unwrap_or_default()
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    pub fn add_listener(
        &self,
        node: NodeId,
        kind: EventKind,
        handler: impl Fn(&mut DomEvent) + Send + Sync + 'static,
    ) -> Result<ListenerId, DomError> {
        let mut inner = self.write_inner();
        inner.node(node)?;
        let id = ListenerId::next();
        inner.listeners.push(Listener {
            id,
            node,
            kind,
            handler: Arc::new(handler),
        });
        Ok(id)
    }

    /// Returns false if the listener was not registered.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut inner = self.write_inner();
        let before = inner.listeners.len();
        inner.listeners.retain(|l| l.id != id);
        inner.listeners.len() != before
    }

    pub fn listener_count(&self, node: NodeId) -> usize {
        self.read_inner()
            .listeners
            .iter()
            .filter(|l| l.node == node)
            .count()
    }

    /// Listen for events of `kind` reaching the document root.
    pub fn subscribe(
        &self,
        kind: EventKind,
        handler: impl Fn(&mut DomEvent) + Send + Sync + 'static,
    ) -> Subscription {
        let root = self.root();
        let id = self.add_listener(root, kind, handler).ok();
        Subscription {
            doc: self.downgrade(),
            id,
        }
    }

    /// Nodes an event at `target` visits: the target, then each ancestor.
    fn propagation_path(&self, target: NodeId) -> Result<Vec<NodeId>, DomError> {
        let inner = self.read_inner();
        inner.node(target)?;
        let mut path = Vec::new();
        let mut current = Some(target);
        while let Some(id) = current {
            path.push(id);
            current = inner.nodes.get(&id).and_then(|n| n.parent);
        }
        Ok(path)
    }

    fn handlers_for(&self, node: NodeId, kind: EventKind) -> Vec<Handler> {
        self.read_inner()
            .listeners
            .iter()
            .filter(|l| l.node == node && l.kind == kind)
            .map(|l| l.handler.clone())
            .collect()
    }

    fn propagate(&self, path: &[NodeId], mut event: DomEvent) -> DomEvent {
        for &node in path {
            event.current_target = node;
            for handler in self.handlers_for(node, event.kind) {
                handler(&mut event);
            }
            if event.is_propagation_stopped() {
                trace!("{:?} at {} stopped at {}", event.kind, event.target, node);
                break;
            }
        }
        event
    }

    /// Deliver an event to its target and bubble it up to the root.
    /// Returns the event as the last listener left it.
    pub fn dispatch_event(&self, event: DomEvent) -> Result<DomEvent, DomError> {
        let path = self.propagation_path(event.target)?;
        trace!("dispatching {:?} at {}", event.kind, event.target);
        Ok(self.propagate(&path, event))
    }

    pub fn dispatch(&self, target: NodeId, kind: EventKind) -> Result<DomEvent, DomError> {
        self.dispatch_event(DomEvent::new(kind, target))
    }

    pub fn click(&self, target: NodeId) -> Result<DomEvent, DomError> {
        self.dispatch(target, EventKind::Click)
    }

    /// Click whatever is rendered at `(x, y)`, or the root if nothing is.
    pub fn click_at(&self, x: i32, y: i32) -> DomEvent {
        let root = self.root();
        let target = hit_test(self, x, y).unwrap_or(root);
        let path = self
            .propagation_path(target)
            .unwrap_or_else(|_| vec![root]);
        self.propagate(&path, DomEvent::new(EventKind::Click, target).at(x, y))
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.read_inner();
        f.debug_struct("Document")
            .field("root", &inner.root)
            .field("nodes", &inner.nodes.len())
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::document::WeakDocument;
use crate::element::NodeId;

/// Kinds of events the document can dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    MouseDown,
    MouseUp,
    MouseOver,
    MouseOut,
    /// Value of a form control changed.
    Change,
}

/// Mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
}

/// An event travelling from its target up to the document root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomEvent {
    pub kind: EventKind,
    /// Node the event was dispatched at.
    pub target: NodeId,
    /// Node whose listeners are currently running.
    pub current_target: NodeId,
    /// Pointer position, when the event came from a pointer.
    pub position: Option<(i32, i32)>,
    pub button: MouseButton,
    propagation_stopped: bool,
}

impl DomEvent {
    pub fn new(kind: EventKind, target: NodeId) -> Self {
        Self {
            kind,
            target,
            current_target: target,
            position: None,
            button: MouseButton::Left,
            propagation_stopped: false,
        }
    }

    pub fn at(mut self, x: i32, y: i32) -> Self {
        self.position = Some((x, y));
        self
    }

    /// Keep the event from reaching listeners on ancestor nodes.
    /// Remaining listeners on the current node still run.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// Callback registered for an event kind on a node.
pub type Handler = Arc<dyn Fn(&mut DomEvent) + Send + Sync>;

/// Identifies a registered listener so it can be removed later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(usize);

impl ListenerId {
    pub(crate) fn next() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl std::fmt::Display for ListenerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__listener_{}", self.0)
    }
}

/// A document-wide listener that stays registered while this value lives.
///
/// Dropping the subscription (or calling [`Subscription::cancel`]) removes the
/// listener. The subscription does not keep the document alive.
#[must_use = "dropping a Subscription unregisters its listener"]
pub struct Subscription {
    pub(crate) doc: WeakDocument,
    pub(crate) id: Option<ListenerId>,
}

impl Subscription {
    pub fn id(&self) -> Option<ListenerId> {
        self.id
    }

    /// Unregister now. Further calls do nothing.
    pub fn cancel(&mut self) {
        if let Some(id) = self.id.take() {
            if let Some(doc) = self.doc.upgrade() {
                doc.remove_listener(id);
            }
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

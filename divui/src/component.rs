use std::any::Any;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock, Weak};

use divdom::{Display, Document, NodeId, Visibility};

use crate::container::{Container, ContainerShared};
use crate::lock::{read, write};

/// Unique identifier for a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentId(usize);

impl ComponentId {
    fn next() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl std::fmt::Display for ComponentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__component_{}", self.0)
    }
}

#[derive(Default)]
struct ComponentState {
    parent: Option<Weak<ContainerShared>>,
    /// Display value to put back when the component is shown again.
    restore_display: Option<String>,
}

struct ComponentInner {
    id: ComponentId,
    doc: Document,
    node: NodeId,
    state: RwLock<ComponentState>,
}

/// Handle to one displayable node in the widget tree.
///
/// Cloning is cheap and clones share state. Two handles are equal only when
/// they refer to the same component.
#[derive(Clone)]
pub struct Component {
    inner: Arc<ComponentInner>,
}

impl Component {
    /// A component backed by a fresh `div`.
    pub fn new(doc: &Document) -> Self {
        Self::with_tag(doc, "div")
    }

    pub fn with_tag(doc: &Document, tag: &str) -> Self {
        Self::wrap(doc, doc.create_element(tag))
    }

    /// Adopt an existing node.
    pub fn wrap(doc: &Document, node: NodeId) -> Self {
        let display = doc.style(node, Display::PROPERTY).unwrap_or_default();
        let state = ComponentState {
            parent: None,
            restore_display: (display != Display::None.as_css()).then_some(display),
        };
        Self {
            inner: Arc::new(ComponentInner {
                id: ComponentId::next(),
                doc: doc.clone(),
                node,
                state: RwLock::new(state),
            }),
        }
    }

    pub fn id(&self) -> ComponentId {
        self.inner.id
    }

    pub fn document(&self) -> &Document {
        &self.inner.doc
    }

    pub fn display_node(&self) -> NodeId {
        self.inner.node
    }

    /// The container this component was last added to, if it is still
    /// alive and still holds the component.
    pub fn parent(&self) -> Option<Container> {
        let parent = read(&self.inner.state).parent.as_ref()?.upgrade()?;
        Some(Container::from_shared(parent))
    }

    pub(crate) fn set_parent(&self, parent: Option<&Container>) {
        write(&self.inner.state).parent = parent.map(Container::downgrade_shared);
    }

    /// Show or hide the component.
    ///
    /// Hiding remembers the current display value so that showing the
    /// component again puts it back. A component that was never displayed
    /// falls back to inline display.
    pub fn set_visible(&self, visible: bool) {
        let doc = &self.inner.doc;
        let node = self.inner.node;
        if visible {
            doc.set_style(node, Visibility::PROPERTY, Visibility::Visible.as_css());
            let restore = read(&self.inner.state).restore_display.clone();
            let display = restore.unwrap_or_else(|| Display::Inline.as_css().to_string());
            doc.set_style(node, Display::PROPERTY, &display);
        } else {
            let current = doc.style(node, Display::PROPERTY).unwrap_or_default();
            if current != Display::None.as_css() {
                write(&self.inner.state).restore_display = Some(current);
            }
            doc.set_style(node, Visibility::PROPERTY, Visibility::Hidden.as_css());
            doc.set_style(node, Display::PROPERTY, Display::None.as_css());
        }
    }

    /// Only an explicit `visibility: hidden` counts as hidden.
    pub fn is_visible(&self) -> bool {
        self.inner
            .doc
            .style(self.inner.node, Visibility::PROPERTY)
            .is_none_or(|v| v != Visibility::Hidden.as_css())
    }

    pub fn downgrade(&self) -> WeakComponent {
        WeakComponent(Arc::downgrade(&self.inner))
    }
}

impl PartialEq for Component {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Component {}

impl std::fmt::Debug for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Component")
            .field("id", &self.inner.id)
            .field("node", &self.inner.node)
            .finish()
    }
}

/// A handle that does not keep its component alive.
#[derive(Clone)]
pub struct WeakComponent(Weak<ComponentInner>);

impl WeakComponent {
    pub fn upgrade(&self) -> Option<Component> {
        self.0.upgrade().map(|inner| Component { inner })
    }
}

impl std::fmt::Debug for WeakComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("WeakComponent")
    }
}

/// Anything that owns a [`Component`] and can therefore sit in a container.
pub trait Widget {
    fn component(&self) -> &Component;

    fn display_node(&self) -> NodeId {
        self.component().display_node()
    }

    fn document(&self) -> &Document {
        self.component().document()
    }

    fn parent(&self) -> Option<Container> {
        self.component().parent()
    }

    fn set_visible(&self, visible: bool) {
        self.component().set_visible(visible)
    }

    fn is_visible(&self) -> bool {
        self.component().is_visible()
    }
}

impl Widget for Component {
    fn component(&self) -> &Component {
        self
    }
}

/// A widget held by whatever displays it: a container slot, a table cell or
/// a tab label.
///
/// Widgets are handles over shared state. Holding only the [`Component`]
/// would let a composite widget such as a tabbed pane be freed while its
/// node is still on screen, so the whole handle is kept alongside it.
#[derive(Clone)]
pub struct OwnedWidget {
    component: Component,
    handle: Arc<dyn Any + Send + Sync>,
}

impl OwnedWidget {
    pub fn new<W: Widget + Clone + Send + Sync + 'static>(widget: &W) -> Self {
        Self {
            component: widget.component().clone(),
            handle: Arc::new(widget.clone()),
        }
    }

    /// Whether only the bare component is held, with no richer widget
    /// state behind it.
    pub(crate) fn is_bare(&self) -> bool {
        self.handle.is::<Component>()
    }
}

impl Widget for OwnedWidget {
    fn component(&self) -> &Component {
        &self.component
    }
}

impl From<Component> for OwnedWidget {
    fn from(component: Component) -> Self {
        Self::new(&component)
    }
}

impl PartialEq for OwnedWidget {
    fn eq(&self, other: &Self) -> bool {
        self.component == other.component
    }
}

impl Eq for OwnedWidget {}

impl std::fmt::Debug for OwnedWidget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("OwnedWidget").field(&self.component).finish()
    }
}

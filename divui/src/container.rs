use std::sync::{Arc, RwLock, Weak};

use divdom::{Document, DomError, NodeId};
use log::{debug, warn};

use crate::component::{Component, OwnedWidget, Widget};
use crate::error::{Result, WidgetError};
use crate::lock::{read, write};

/// Called after a child was added to or removed from a container, with the
/// child's index at that moment.
pub(crate) type ChildObserver = Arc<dyn Fn(&Container, &Component, usize) + Send + Sync>;

#[derive(Default)]
struct Observers {
    added: Vec<ChildObserver>,
    removed: Vec<ChildObserver>,
}

pub(crate) struct ContainerShared {
    component: Component,
    children: RwLock<Vec<OwnedWidget>>,
    observers: RwLock<Observers>,
}

/// Identifies a child of a container, by position or by identity.
#[derive(Debug, Clone)]
pub enum ChildRef {
    Index(usize),
    Component(Component),
}

impl From<usize> for ChildRef {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<Component> for ChildRef {
    fn from(component: Component) -> Self {
        Self::Component(component)
    }
}

impl<W: Widget + ?Sized> From<&W> for ChildRef {
    fn from(widget: &W) -> Self {
        Self::Component(widget.component().clone())
    }
}

/// A component that holds an ordered list of child components.
///
/// The child list and the child nodes of the container's display node are
/// kept in the same order, and every child knows this container as its
/// parent. A component is a child of at most one container: adding it here
/// removes it from wherever it was.
///
/// The container owns the widgets added to it, so a composite child keeps
/// working after the caller drops its own handle.
#[derive(Clone)]
pub struct Container {
    shared: Arc<ContainerShared>,
}

impl Container {
    pub fn new(doc: &Document) -> Self {
        Self::from_component(Component::new(doc))
    }

    /// Adopt an existing node as the container's display node.
    pub fn wrap(doc: &Document, node: NodeId) -> Self {
        Self::from_component(Component::wrap(doc, node))
    }

    fn from_component(component: Component) -> Self {
        Self {
            shared: Arc::new(ContainerShared {
                component,
                children: RwLock::new(Vec::new()),
                observers: RwLock::new(Observers::default()),
            }),
        }
    }

    pub(crate) fn from_shared(shared: Arc<ContainerShared>) -> Self {
        Self { shared }
    }

    pub(crate) fn downgrade_shared(&self) -> Weak<ContainerShared> {
        Arc::downgrade(&self.shared)
    }

    pub fn downgrade(&self) -> WeakContainer {
        WeakContainer(self.downgrade_shared())
    }

    pub(crate) fn observe_added(&self, observer: ChildObserver) {
        write(&self.shared.observers).added.push(observer);
    }

    pub(crate) fn observe_removed(&self, observer: ChildObserver) {
        write(&self.shared.observers).removed.push(observer);
    }

    fn notify(&self, added: bool, child: &Component, index: usize) {
        let observers = {
            let observers = read(&self.shared.observers);
            if added {
                observers.added.clone()
            } else {
                observers.removed.clone()
            }
        };
        for observer in observers {
            observer(self, child, index);
        }
    }

    // -------------------------------------------------------------------------
    // Adding
    // -------------------------------------------------------------------------

    /// Append a widget, moving it here from any previous container.
    /// Returns the widget for chaining.
    pub fn add<W: Widget + Clone + Send + Sync + 'static>(&self, widget: W) -> Result<W> {
        self.insert(OwnedWidget::new(&widget), false)?;
        Ok(widget)
    }

    /// Like [`Container::add`] but places the widget first.
    pub fn add_first<W: Widget + Clone + Send + Sync + 'static>(&self, widget: W) -> Result<W> {
        self.insert(OwnedWidget::new(&widget), true)?;
        Ok(widget)
    }

    /// Moving a bare component out of another container keeps the widget
    /// that container held for it.
    pub(crate) fn insert(&self, owned: OwnedWidget, first: bool) -> Result<()> {
        let doc = self.document();
        let parent_node = self.display_node();
        let child = owned.component().clone();
        let node = child.display_node();
        if !doc.has_node(node) {
            return Err(DomError::UnknownNode(node).into());
        }
        if doc.contains(node, parent_node) {
            return Err(DomError::HierarchyRequest {
                parent: parent_node,
                child: node,
            }
            .into());
        }

        let owned = match child.parent() {
            Some(previous) => {
                let carried = previous.take(ChildRef::Component(child.clone()))?;
                if owned.is_bare() { carried } else { owned }
            }
            None => {
                doc.detach(node)?;
                owned
            }
        };

        let reference = if first {
            read(&self.shared.children)
                .first()
                .map(OwnedWidget::display_node)
                .or_else(|| doc.first_child(parent_node))
        } else {
            None
        };
        doc.insert_before(parent_node, node, reference)?;
        child.set_parent(Some(self));

        let index = {
            let mut children = write(&self.shared.children);
            if first {
                children.insert(0, owned);
                0
            } else {
                children.push(owned);
                children.len() - 1
            }
        };
        debug!("added {} to {} at {index}", child.id(), self.component().id());
        self.notify(true, &child, index);
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Removing
    // -------------------------------------------------------------------------

    fn resolve(&self, target: ChildRef) -> Result<(usize, Component)> {
        let children = read(&self.shared.children);
        match target {
            ChildRef::Index(index) => children
                .get(index)
                .map(|c| (index, c.component().clone()))
                .ok_or(WidgetError::IndexOutOfRange {
                    index,
                    len: children.len(),
                }),
            ChildRef::Component(component) => children
                .iter()
                .position(|c| *c.component() == component)
                .map(|index| (index, component))
                .ok_or(WidgetError::NotFound),
        }
    }

    /// Remove a child by index or identity and return it.
    pub fn remove(&self, target: impl Into<ChildRef>) -> Result<Component> {
        let owned = self.take(target.into())?;
        Ok(owned.component().clone())
    }

    /// Remove a child, handing back the widget this container held for it.
    fn take(&self, target: ChildRef) -> Result<OwnedWidget> {
        let (index, child) = self.resolve(target)?;
        let doc = self.document();
        match doc.remove_child(self.display_node(), child.display_node()) {
            Ok(()) => {}
            Err(DomError::NotAChild { .. }) => {
                warn!("{} was moved out of {} behind its back", child.id(), self.component().id());
            }
            Err(err) => return Err(err.into()),
        }
        child.set_parent(None);
        let owned = write(&self.shared.children).remove(index);
        debug!("removed {} from {} at {index}", child.id(), self.component().id());
        self.notify(false, &child, index);
        Ok(owned)
    }

    pub fn remove_first(&self) -> Result<Component> {
        self.remove(ChildRef::Index(0))
    }

    pub fn remove_last(&self) -> Result<Component> {
        match self.component_count() {
            0 => Err(WidgetError::IndexOutOfRange { index: 0, len: 0 }),
            len => self.remove(len - 1),
        }
    }

    /// Remove every child, returning them in their former order.
    pub fn remove_all(&self) -> Result<Vec<Component>> {
        let mut removed = Vec::with_capacity(self.component_count());
        while self.component_count() > 0 {
            removed.push(self.remove(ChildRef::Index(0))?);
        }
        Ok(removed)
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    pub fn index_of(&self, widget: &impl Widget) -> Option<usize> {
        let component = widget.component();
        read(&self.shared.children)
            .iter()
            .position(|c| c.component() == component)
    }

    pub fn component_at(&self, index: usize) -> Result<Component> {
        let children = read(&self.shared.children);
        children
            .get(index)
            .map(|c| c.component().clone())
            .ok_or(WidgetError::IndexOutOfRange {
                index,
                len: children.len(),
            })
    }

    /// A snapshot of the children in order.
    pub fn components(&self) -> Vec<Component> {
        read(&self.shared.children)
            .iter()
            .map(|c| c.component().clone())
            .collect()
    }

    pub fn component_count(&self) -> usize {
        read(&self.shared.children).len()
    }

    pub fn is_empty(&self) -> bool {
        self.component_count() == 0
    }
}

impl Widget for Container {
    fn component(&self) -> &Component {
        &self.shared.component
    }
}

impl PartialEq for Container {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }
}

impl Eq for Container {}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field("component", &self.shared.component)
            .field("children", &self.component_count())
            .finish()
    }
}

/// A handle that does not keep its container alive.
#[derive(Clone)]
pub struct WeakContainer(Weak<ContainerShared>);

impl WeakContainer {
    pub fn upgrade(&self) -> Option<Container> {
        self.0.upgrade().map(Container::from_shared)
    }
}

/// A widget built around a [`Container`].
///
/// Gives every container-like widget the container's removal and query
/// operations. Adding stays with each widget, since some of them attach
/// behavior to new children.
pub trait ContainerWidget: Widget {
    fn container(&self) -> &Container;

    fn remove(&self, target: impl Into<ChildRef>) -> Result<Component>
    where
        Self: Sized,
    {
        self.container().remove(target)
    }

    fn remove_first(&self) -> Result<Component> {
        self.container().remove_first()
    }

    fn remove_last(&self) -> Result<Component> {
        self.container().remove_last()
    }

    fn remove_all(&self) -> Result<Vec<Component>> {
        self.container().remove_all()
    }

    fn index_of(&self, widget: &impl Widget) -> Option<usize>
    where
        Self: Sized,
    {
        self.container().index_of(widget)
    }

    fn component_at(&self, index: usize) -> Result<Component> {
        self.container().component_at(index)
    }

    fn components(&self) -> Vec<Component> {
        self.container().components()
    }

    fn component_count(&self) -> usize {
        self.container().component_count()
    }
}

impl ContainerWidget for Container {
    fn container(&self) -> &Container {
        self
    }
}

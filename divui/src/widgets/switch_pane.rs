use std::sync::Arc;

use divdom::{Document, NodeId};
use log::debug;

use crate::component::{Component, Widget};
use crate::container::{Container, ContainerWidget};
use crate::error::{Result, WidgetError};

/// A container that shows exactly one of its children at a time.
///
/// The first child added becomes visible; later children start hidden.
/// Removing the visible child shows the one that took its place, or the new
/// last child if it was last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchPane {
    container: Container,
}

impl SwitchPane {
    pub fn new(doc: &Document) -> Self {
        Self::from_container(Container::new(doc))
    }

    pub fn wrap(doc: &Document, node: NodeId) -> Self {
        Self::from_container(Container::wrap(doc, node))
    }

    fn from_container(container: Container) -> Self {
        container.observe_added(Arc::new(|pane: &Container, child: &Component, _: usize| {
            child.set_visible(pane.component_count() == 1);
        }));
        container.observe_removed(Arc::new(|pane: &Container, child: &Component, index: usize| {
            let remaining = pane.component_count();
            if child.is_visible() && remaining > 0 {
                show_only(pane, index.min(remaining - 1));
            }
        }));
        Self { container }
    }

    pub fn add<W: Widget + Clone + Send + Sync + 'static>(&self, widget: W) -> Result<W> {
        self.container.add(widget)
    }

    pub fn add_first<W: Widget + Clone + Send + Sync + 'static>(&self, widget: W) -> Result<W> {
        self.container.add_first(widget)
    }

    /// Make the child at `index` the visible one.
    pub fn show_index(&self, index: usize) -> Result<()> {
        let len = self.container.component_count();
        if index >= len {
            return Err(WidgetError::IndexOutOfRange { index, len });
        }
        show_only(&self.container, index);
        Ok(())
    }

    pub fn show_component(&self, widget: &impl Widget) -> Result<()> {
        let index = self
            .container
            .index_of(widget)
            .ok_or(WidgetError::NotFound)?;
        self.show_index(index)
    }

    /// Index of the visible child.
    pub fn visible_index(&self) -> Option<usize> {
        self.container
            .components()
            .iter()
            .position(Component::is_visible)
    }
}

fn show_only(pane: &Container, index: usize) {
    debug!("{} showing child {index}", pane.component().id());
    for (i, child) in pane.components().iter().enumerate() {
        child.set_visible(i == index);
    }
}

impl Widget for SwitchPane {
    fn component(&self) -> &Component {
        self.container.component()
    }
}

impl ContainerWidget for SwitchPane {
    fn container(&self) -> &Container {
        &self.container
    }
}

use divdom::{Document, DomError, NodeId};

use crate::component::{Component, OwnedWidget, Widget};
use crate::error::Result;

/// What a cell, tab label or header shows: inline text or markup, a raw
/// node, or a widget. The host of a widget keeps it alive.
#[derive(Debug, Clone)]
pub enum Content {
    Text(String),
    Node(NodeId),
    Widget(OwnedWidget),
}

impl Content {
    pub fn widget<W: Widget + Clone + Send + Sync + 'static>(widget: &W) -> Self {
        Self::Widget(OwnedWidget::new(widget))
    }

    /// The widget this content shows, for the host to hold on to.
    pub(crate) fn into_widget(self) -> Option<OwnedWidget> {
        match self {
            Content::Widget(widget) => Some(widget),
            Content::Text(_) | Content::Node(_) => None,
        }
    }

    /// Replace everything inside `target` with this content.
    ///
    /// A widget that currently lives in a container is removed from it first.
    pub(crate) fn fill(&self, doc: &Document, target: NodeId) -> Result<()> {
        let node = match self {
            Content::Text(text) => {
                doc.set_text(target, text);
                return Ok(());
            }
            Content::Node(node) => *node,
            Content::Widget(widget) => widget.display_node(),
        };
        if !doc.has_node(node) {
            return Err(DomError::UnknownNode(node).into());
        }
        if doc.contains(node, target) {
            return Err(DomError::HierarchyRequest {
                parent: target,
                child: node,
            }
            .into());
        }

        if let Content::Widget(widget) = self {
            if let Some(parent) = widget.parent() {
                parent.remove(widget.component())?;
            }
        }
        doc.set_text(target, "");
        doc.append_child(target, node)?;
        Ok(())
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<NodeId> for Content {
    fn from(node: NodeId) -> Self {
        Self::Node(node)
    }
}

impl From<Component> for Content {
    fn from(component: Component) -> Self {
        Self::Widget(component.into())
    }
}

impl From<&Component> for Content {
    fn from(component: &Component) -> Self {
        Self::Widget(component.clone().into())
    }
}

impl From<OwnedWidget> for Content {
    fn from(widget: OwnedWidget) -> Self {
        Self::Widget(widget)
    }
}

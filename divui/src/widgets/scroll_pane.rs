use divdom::{Document, Overflow};

use crate::component::{Component, Widget};
use crate::container::Container;
use crate::error::Result;

/// When a scroll pane shows a scrollbar along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollPolicy {
    /// Clip the contents, no scrollbar.
    Never,
    /// Scrollbar only while the contents overflow.
    Auto,
    Always,
}

impl ScrollPolicy {
    pub fn overflow(self) -> Overflow {
        match self {
            ScrollPolicy::Never => Overflow::Hidden,
            ScrollPolicy::Auto => Overflow::Auto,
            ScrollPolicy::Always => Overflow::Scroll,
        }
    }
}

/// A pane showing one fixed contents widget with per-axis scrolling.
///
/// The contents are set once at construction. The pane offers no way to add
/// or remove children.
#[derive(Debug, Clone)]
pub struct ScrollPane {
    container: Container,
    contents: Component,
    vertical: ScrollPolicy,
    horizontal: ScrollPolicy,
}

impl ScrollPane {
    pub fn new(
        doc: &Document,
        contents: &(impl Widget + Clone + Send + Sync + 'static),
        vertical: ScrollPolicy,
        horizontal: ScrollPolicy,
    ) -> Result<Self> {
        let container = Container::new(doc);
        let node = container.display_node();
        doc.set_style(node, "overflow-y", vertical.overflow().as_css());
        doc.set_style(node, "overflow-x", horizontal.overflow().as_css());
        container.add(contents.clone())?;
        Ok(Self {
            container,
            contents: contents.component().clone(),
            vertical,
            horizontal,
        })
    }

    pub fn contents(&self) -> &Component {
        &self.contents
    }

    pub fn v_scroll_policy(&self) -> ScrollPolicy {
        self.vertical
    }

    pub fn h_scroll_policy(&self) -> ScrollPolicy {
        self.horizontal
    }
}

impl Widget for ScrollPane {
    fn component(&self) -> &Component {
        self.container.component()
    }
}

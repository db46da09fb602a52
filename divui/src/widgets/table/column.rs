use std::cmp::Ordering;
use std::sync::{Arc, RwLock};

use divdom::render::inner_markup;
use divdom::{Display, Document};

use super::Row;
use crate::component::{Component, OwnedWidget, Widget};
use crate::content::Content;
use crate::error::Result;
use crate::lock::{read, write};
use crate::style::Style;

/// Orders two rows when a table is sorted by a column.
pub type Comparator = Arc<dyn Fn(&Row, &Row) -> Ordering + Send + Sync>;

/// Compares the cell markup of `column_id`, byte by byte.
pub fn lexicographic(column_id: &str) -> Comparator {
    let id = column_id.to_string();
    Arc::new(move |a: &Row, b: &Row| a.contents(&id).cmp(&b.contents(&id)))
}

struct ColumnShared {
    id: String,
    component: Component,
    comparator: RwLock<Option<Comparator>>,
    /// A widget used as the header label.
    label: RwLock<Option<OwnedWidget>>,
}

/// A column of a [`Table`](super::Table): its header cell and how rows sort
/// by it.
#[derive(Clone)]
pub struct Column {
    shared: Arc<ColumnShared>,
}

impl Column {
    pub(crate) fn new(doc: &Document, id: &str, label: Content) -> Result<Self> {
        let component = Component::new(doc);
        let node = component.display_node();
        doc.set_style(node, Display::PROPERTY, Display::TableCell.as_css());
        doc.set_style(node, "cursor", "pointer");
        label.fill(doc, node)?;
        Ok(Self {
            shared: Arc::new(ColumnShared {
                id: id.to_string(),
                component,
                comparator: RwLock::new(Some(lexicographic(id))),
                label: RwLock::new(label.into_widget()),
            }),
        })
    }

    pub fn id(&self) -> &str {
        &self.shared.id
    }

    /// Markup of the header cell.
    pub fn label(&self) -> String {
        inner_markup(self.document(), self.display_node())
    }

    pub fn set_label(&self, label: impl Into<Content>) -> Result<()> {
        let label = label.into();
        label.fill(self.document(), self.display_node())?;
        *write(&self.shared.label) = label.into_widget();
        Ok(())
    }

    /// The widget shown in the header cell, if the label is not plain text.
    pub fn label_widget(&self) -> Option<Component> {
        read(&self.shared.label)
            .as_ref()
            .map(|w| w.component().clone())
    }

    pub fn comparator(&self) -> Option<Comparator> {
        read(&self.shared.comparator).clone()
    }

    pub fn set_comparator(
        &self,
        comparator: impl Fn(&Row, &Row) -> Ordering + Send + Sync + 'static,
    ) {
        *write(&self.shared.comparator) = Some(Arc::new(comparator));
    }

    /// Make the column unsortable.
    pub fn clear_comparator(&self) {
        *write(&self.shared.comparator) = None;
    }

    /// Replace the header cell's inline style. The cell keeps its
    /// table-cell display.
    pub fn set_style(&self, style: &Style) {
        let doc = self.document();
        let node = self.display_node();
        doc.set_css_text(node, "");
        doc.set_style(node, Display::PROPERTY, Display::TableCell.as_css());
        style.apply_to(doc, node);
        doc.set_style(node, Display::PROPERTY, Display::TableCell.as_css());
    }

    pub fn style(&self) -> String {
        self.document().css_text(self.display_node())
    }

    pub fn width(&self) -> u32 {
        self.document().layout(self.display_node()).width
    }

    pub fn header_height(&self) -> u32 {
        self.document().layout(self.display_node()).height
    }
}

impl Widget for Column {
    fn component(&self) -> &Component {
        &self.shared.component
    }
}

impl PartialEq for Column {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }
}

impl std::fmt::Debug for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Column")
            .field("id", &self.shared.id)
            .field("component", &self.shared.component)
            .finish()
    }
}

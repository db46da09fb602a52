use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use divdom::render::inner_markup;
use divdom::{Display, Document, NodeId};

use crate::component::{Component, OwnedWidget, Widget};
use crate::content::Content;
use crate::error::{Result, WidgetError};
use crate::lock::{read, write};
use crate::style::Style;

type Model = Arc<dyn Any + Send + Sync>;

struct RowShared {
    component: Component,
    /// One cell per column, in column order.
    cells: Vec<(String, NodeId)>,
    /// Widgets currently shown in cells, kept alive by the row.
    widgets: RwLock<HashMap<String, OwnedWidget>>,
    model: RwLock<Option<Model>>,
    cell_style: RwLock<Option<Style>>,
}

/// A row of a [`Table`](super::Table), with one cell per column that existed
/// when the row was created.
///
/// A row can carry an arbitrary model value, typically the record it shows.
#[derive(Clone)]
pub struct Row {
    shared: Arc<RowShared>,
}

impl Row {
    pub(crate) fn new(doc: &Document, column_ids: &[String]) -> Result<Self> {
        let component = Component::new(doc);
        let node = component.display_node();
        doc.set_style(node, Display::PROPERTY, Display::TableRow.as_css());

        let mut cells = Vec::with_capacity(column_ids.len());
        for id in column_ids {
            let cell = doc.create_element("div");
            doc.set_style(cell, Display::PROPERTY, Display::TableCell.as_css());
            doc.append_child(node, cell)?;
            cells.push((id.clone(), cell));
        }

        Ok(Self {
            shared: Arc::new(RowShared {
                component,
                cells,
                widgets: RwLock::new(HashMap::new()),
                model: RwLock::new(None),
                cell_style: RwLock::new(None),
            }),
        })
    }

    pub fn cell_node(&self, column_id: &str) -> Option<NodeId> {
        self.shared
            .cells
            .iter()
            .find(|(id, _)| id == column_id)
            .map(|(_, cell)| *cell)
    }

    fn cell(&self, column_id: &str) -> Result<NodeId> {
        self.cell_node(column_id)
            .ok_or_else(|| WidgetError::UnknownColumn(column_id.to_string()))
    }

    pub fn column_ids(&self) -> Vec<String> {
        self.shared.cells.iter().map(|(id, _)| id.clone()).collect()
    }

    // -------------------------------------------------------------------------
    // Contents
    // -------------------------------------------------------------------------

    /// Replace what one cell shows.
    pub fn update_cell(&self, column_id: &str, content: impl Into<Content>) -> Result<()> {
        let cell = self.cell(column_id)?;
        self.fill(column_id, cell, content.into())
    }

    fn fill(&self, column_id: &str, cell: NodeId, content: Content) -> Result<()> {
        content.fill(self.document(), cell)?;
        let mut widgets = write(&self.shared.widgets);
        match content.into_widget() {
            Some(widget) => {
                widgets.insert(column_id.to_string(), widget);
            }
            None => {
                widgets.remove(column_id);
            }
        }
        Ok(())
    }

    /// Update the cells named in `contents`, leaving the others alone.
    ///
    /// Every column id is checked before any cell changes.
    pub fn update<I, K, V>(&self, contents: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Content>,
    {
        let mut updates = Vec::new();
        for (id, content) in contents {
            let id = id.into();
            let cell = self.cell(&id)?;
            updates.push((id, cell, content.into()));
        }
        for (id, cell, content) in updates {
            self.fill(&id, cell, content)?;
        }
        Ok(())
    }

    /// Markup of a cell, or an empty string for an unknown column.
    pub fn contents(&self, column_id: &str) -> String {
        self.cell_node(column_id)
            .map(|cell| inner_markup(self.document(), cell))
            .unwrap_or_default()
    }

    // -------------------------------------------------------------------------
    // Model
    // -------------------------------------------------------------------------

    /// The model, if one is set and it is a `T`.
    pub fn model<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        let model = read(&self.shared.model).clone()?;
        model.downcast::<T>().ok()
    }

    pub fn set_model<T: Any + Send + Sync>(&self, model: T) {
        *write(&self.shared.model) = Some(Arc::new(model));
    }

    pub fn clear_model(&self) {
        *write(&self.shared.model) = None;
    }

    // -------------------------------------------------------------------------
    // Look and metrics
    // -------------------------------------------------------------------------

    /// Replace the inline style of every cell. Cells always keep their
    /// table-cell display.
    pub fn set_cell_style(&self, style: &Style) {
        let doc = self.document();
        for (_, cell) in &self.shared.cells {
            doc.set_css_text(*cell, "");
            doc.set_style(*cell, Display::PROPERTY, Display::TableCell.as_css());
            style.apply_to(doc, *cell);
            doc.set_style(*cell, Display::PROPERTY, Display::TableCell.as_css());
        }
        *write(&self.shared.cell_style) = Some(style.clone());
    }

    pub fn cell_style(&self) -> Option<Style> {
        read(&self.shared.cell_style).clone()
    }

    pub fn cell_width(&self, column_id: &str) -> Option<u32> {
        let cell = self.cell_node(column_id)?;
        Some(self.document().layout(cell).width)
    }

    pub fn cell_height(&self, column_id: &str) -> Option<u32> {
        let cell = self.cell_node(column_id)?;
        Some(self.document().layout(cell).height)
    }

    /// Sum of the cell widths.
    pub fn width(&self) -> u32 {
        let doc = self.document();
        self.shared
            .cells
            .iter()
            .map(|(_, cell)| doc.layout(*cell).width)
            .sum()
    }

    /// Height of the tallest cell.
    pub fn height(&self) -> u32 {
        let doc = self.document();
        self.shared
            .cells
            .iter()
            .map(|(_, cell)| doc.layout(*cell).height)
            .max()
            .unwrap_or(0)
    }
}

impl Widget for Row {
    fn component(&self) -> &Component {
        &self.shared.component
    }
}

impl PartialEq for Row {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }
}

impl Eq for Row {}

impl std::fmt::Debug for Row {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Row")
            .field("component", &self.shared.component)
            .field("columns", &self.column_ids())
            .finish()
    }
}

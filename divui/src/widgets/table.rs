//! Table widget - sortable rows under a header of columns, laid out with
//! table display on plain elements.

mod column;
mod row;

pub use column::{Column, Comparator, lexicographic};
pub use row::Row;

use std::sync::{Arc, RwLock};

use divdom::{Display, DomError, Document, EventKind, NodeId};
use log::{debug, warn};

use crate::component::{Component, Widget};
use crate::content::Content;
use crate::error::{Result, WidgetError};
use crate::lock::{read, write};
use crate::style::Style;

#[derive(Default)]
struct TableState {
    columns: Vec<Column>,
    rows: Vec<Row>,
    cell_style: Option<Style>,
}

struct TableShared {
    component: Component,
    header: NodeId,
    body: NodeId,
    state: RwLock<TableState>,
}

/// Rows of cells under a header of columns.
///
/// Columns are fixed for the rows created before them: a row has one cell
/// for each column that existed when it was added. Clicking a column header
/// sorts the rows by that column.
///
/// ```
/// use divdom::Document;
/// use divui::widgets::Table;
///
/// let doc = Document::new();
/// let table = Table::new(&doc).unwrap();
/// table.add_column("name", "Name").unwrap();
/// table.add_row([("name", "Bob")]).unwrap();
/// table.add_row([("name", "Alice")]).unwrap();
/// table.sort_by_column("name").unwrap();
/// assert_eq!(table.row(0).unwrap().contents("name"), "Alice");
/// ```
#[derive(Clone)]
pub struct Table {
    shared: Arc<TableShared>,
}

impl Table {
    pub fn new(doc: &Document) -> Result<Self> {
        let component = Component::new(doc);
        let node = component.display_node();
        doc.set_style(node, Display::PROPERTY, Display::Table.as_css());

        let header = doc.create_element("div");
        doc.set_style(header, Display::PROPERTY, Display::TableRow.as_css());
        doc.append_child(node, header)?;

        let body = doc.create_element("div");
        doc.set_style(body, Display::PROPERTY, Display::TableRowGroup.as_css());
        doc.append_child(node, body)?;

        Ok(Self {
            shared: Arc::new(TableShared {
                component,
                header,
                body,
                state: RwLock::new(TableState::default()),
            }),
        })
    }

    pub fn header_node(&self) -> NodeId {
        self.shared.header
    }

    pub fn body_node(&self) -> NodeId {
        self.shared.body
    }

    // =========================================================================
    // Columns
    // =========================================================================

    /// Append a column. Rows added from now on get a cell for it.
    pub fn add_column(&self, id: &str, label: impl Into<Content>) -> Result<Column> {
        if self.column(id).is_some() {
            return Err(WidgetError::DuplicateColumn(id.to_string()));
        }
        let doc = self.document();
        let column = Column::new(doc, id, label.into())?;
        doc.append_child(self.shared.header, column.display_node())?;

        let table = Arc::downgrade(&self.shared);
        let column_id = id.to_string();
        doc.add_listener(column.display_node(), EventKind::Click, move |event| {
            event.stop_propagation();
            let Some(shared) = table.upgrade() else {
                return;
            };
            if let Err(err) = (Table { shared }).sort_by_column(&column_id) {
                warn!("sorting by `{column_id}` failed: {err}");
            }
        })?;

        write(&self.shared.state).columns.push(column.clone());
        debug!("{} gained column `{id}`", self.component().id());
        Ok(column)
    }

    pub fn column(&self, id: &str) -> Option<Column> {
        read(&self.shared.state)
            .columns
            .iter()
            .find(|c| c.id() == id)
            .cloned()
    }

    pub fn columns(&self) -> Vec<Column> {
        read(&self.shared.state).columns.clone()
    }

    pub fn column_ids(&self) -> Vec<String> {
        read(&self.shared.state)
            .columns
            .iter()
            .map(|c| c.id().to_string())
            .collect()
    }

    pub fn column_count(&self) -> usize {
        read(&self.shared.state).columns.len()
    }

    // =========================================================================
    // Rows
    // =========================================================================

    /// Append a row. Columns missing from `contents` get empty cells.
    pub fn add_row<I, K, V>(&self, contents: I) -> Result<Row>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Content>,
    {
        let row = self.build_row(contents)?;
        self.document()
            .append_child(self.shared.body, row.display_node())?;
        write(&self.shared.state).rows.push(row.clone());
        Ok(row)
    }

    /// Like [`Table::add_row`] but puts the row first.
    pub fn add_row_first<I, K, V>(&self, contents: I) -> Result<Row>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Content>,
    {
        let row = self.build_row(contents)?;
        let doc = self.document();
        let reference = read(&self.shared.state)
            .rows
            .first()
            .map(Row::display_node)
            .or_else(|| doc.first_child(self.shared.body));
        doc.insert_before(self.shared.body, row.display_node(), reference)?;
        write(&self.shared.state).rows.insert(0, row.clone());
        Ok(row)
    }

    fn build_row<I, K, V>(&self, contents: I) -> Result<Row>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Content>,
    {
        let (ids, cell_style) = {
            let state = read(&self.shared.state);
            let ids = state
                .columns
                .iter()
                .map(|c| c.id().to_string())
                .collect::<Vec<_>>();
            (ids, state.cell_style.clone())
        };
        let row = Row::new(self.document(), &ids)?;
        row.update(contents)?;
        if let Some(style) = cell_style {
            row.set_cell_style(&style);
        }
        Ok(row)
    }

    /// Style the cells of every row added from now on.
    pub fn set_cell_style(&self, style: Style) {
        write(&self.shared.state).cell_style = Some(style);
    }

    pub fn row(&self, index: usize) -> Result<Row> {
        let state = read(&self.shared.state);
        state
            .rows
            .get(index)
            .cloned()
            .ok_or(WidgetError::IndexOutOfRange {
                index,
                len: state.rows.len(),
            })
    }

    /// A snapshot of the rows in display order.
    pub fn rows(&self) -> Vec<Row> {
        read(&self.shared.state).rows.clone()
    }

    pub fn index_of_row(&self, row: &Row) -> Option<usize> {
        read(&self.shared.state).rows.iter().position(|r| r == row)
    }

    pub fn row_count(&self) -> usize {
        read(&self.shared.state).rows.len()
    }

    pub fn remove_row(&self, index: usize) -> Result<Row> {
        let row = self.row(index)?;
        self.detach_row(&row)?;
        write(&self.shared.state).rows.remove(index);
        Ok(row)
    }

    /// Remove every row, returning them in their former order.
    pub fn remove_all_rows(&self) -> Result<Vec<Row>> {
        let rows = self.rows();
        for row in &rows {
            self.detach_row(row)?;
        }
        write(&self.shared.state).rows.clear();
        debug!("{} cleared {} rows", self.component().id(), rows.len());
        Ok(rows)
    }

    fn detach_row(&self, row: &Row) -> Result<()> {
        match self
            .document()
            .remove_child(self.shared.body, row.display_node())
        {
            Ok(()) => Ok(()),
            Err(DomError::NotAChild { .. }) => {
                warn!("row {} was already detached", row.component().id());
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }

    // =========================================================================
    // Sorting
    // =========================================================================

    /// Stable-sort the rows with the column's comparator and redisplay them
    /// in the new order. Does nothing if the column has no comparator.
    pub fn sort_by_column(&self, id: &str) -> Result<()> {
        let column = self
            .column(id)
            .ok_or_else(|| WidgetError::UnknownColumn(id.to_string()))?;
        let Some(comparator) = column.comparator() else {
            debug!("column `{id}` is not sortable");
            return Ok(());
        };

        let mut rows = self.rows();
        rows.sort_by(|a, b| comparator(a, b));

        let doc = self.document();
        for row in &rows {
            doc.append_child(self.shared.body, row.display_node())?;
        }
        write(&self.shared.state).rows = rows;
        debug!("{} sorted by `{id}`", self.component().id());
        Ok(())
    }
}

impl Widget for Table {
    fn component(&self) -> &Component {
        &self.shared.component
    }
}

impl std::fmt::Debug for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = read(&self.shared.state);
        f.debug_struct("Table")
            .field("component", &self.shared.component)
            .field("columns", &state.columns.len())
            .field("rows", &state.rows.len())
            .finish()
    }
}

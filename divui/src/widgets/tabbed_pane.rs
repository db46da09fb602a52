//! Tabbed pane - a switch pane with a strip of clickable tabs above it.

mod tab;

pub use tab::Tab;

use std::sync::{Arc, RwLock};

use divdom::{Display, Document, EventKind, ListenerId, NodeId};
use log::{debug, warn};

use crate::component::{Component, OwnedWidget, Widget};
use crate::container::{ChildRef, Container, ContainerWidget};
use crate::content::Content;
use crate::error::{Result, WidgetError};
use crate::lock::{read, write};
use crate::style::Style;
use crate::widgets::SwitchPane;

// =============================================================================
// TabbedPane
// =============================================================================

/// A tab paired with the content it selects.
struct TabEntry {
    tab: Tab,
    content: Component,
    listener: ListenerId,
}

struct TabbedPaneShared {
    container: Container,
    strip: Container,
    pane: SwitchPane,
    /// In tab strip order, which is also content order.
    entries: RwLock<Vec<TabEntry>>,
}

/// A container showing one content component at a time, chosen by clicking
/// its tab.
///
/// Every content component has exactly one tab. Removing either one, by any
/// route, removes the other, and exactly one tab is selected whenever the
/// pane is not empty.
#[derive(Clone)]
pub struct TabbedPane {
    shared: Arc<TabbedPaneShared>,
}

impl TabbedPane {
    pub fn new(doc: &Document) -> Result<Self> {
        let container = Container::new(doc);

        let strip = Container::new(doc);
        doc.set_style(
            strip.display_node(),
            Display::PROPERTY,
            Display::TableRow.as_css(),
        );
        container.add(strip.clone())?;

        let pane = SwitchPane::new(doc);
        Style::new([
            ("border", "1px solid"),
            ("padding-top", "1px"),
            ("position", "relative"),
        ])
        .apply_to(doc, pane.display_node());
        container.add(pane.clone())?;

        let shared = Arc::new(TabbedPaneShared {
            container,
            strip,
            pane,
            entries: RwLock::new(Vec::new()),
        });

        let weak = Arc::downgrade(&shared);
        shared.pane.container().observe_removed(Arc::new(
            move |_: &Container, content: &Component, _: usize| {
                if let Some(shared) = weak.upgrade() {
                    TabbedPane { shared }.content_removed(content);
                }
            },
        ));
        let weak = Arc::downgrade(&shared);
        shared.strip.observe_removed(Arc::new(
            move |_: &Container, tab: &Component, _: usize| {
                if let Some(shared) = weak.upgrade() {
                    TabbedPane { shared }.tab_removed(tab);
                }
            },
        ));

        Ok(Self { shared })
    }

    /// Add `widget` under a new tab showing `label`.
    ///
    /// A widget that is already in this pane moves to the end with its new
    /// tab. The first widget added is selected.
    pub fn add<W: Widget + Clone + Send + Sync + 'static>(
        &self,
        label: impl Into<Content>,
        widget: W,
    ) -> Result<W> {
        let doc = self.document();
        let owned = OwnedWidget::new(&widget);
        let content = owned.component().clone();
        if self.index_of(&content).is_some() {
            self.remove(&content)?;
        }

        let tab = Tab::new(doc, label)?;
        doc.set_style(tab.display_node(), "z-index", "1");

        self.shared.pane.container().insert(owned, false)?;
        if let Err(err) = self.shared.strip.add(tab.clone()) {
            self.shared.pane.remove(&content)?;
            return Err(err);
        }
        let listener = self.listen_for_clicks(&tab, &content)?;
        write(&self.shared.entries).push(TabEntry {
            tab,
            content,
            listener,
        });
        debug!("{} now has {} tabs", self.component().id(), self.component_count());

        if self.component_count() == 1 {
            self.set_selected_index(0)?;
        } else {
            self.sync_tabs();
        }
        Ok(widget)
    }

    fn listen_for_clicks(&self, tab: &Tab, content: &Component) -> Result<ListenerId> {
        let weak = Arc::downgrade(&self.shared);
        let content = content.downgrade();
        let listener =
            self.document()
                .add_listener(tab.display_node(), EventKind::Click, move |_| {
                    let (Some(shared), Some(content)) = (weak.upgrade(), content.upgrade())
                    else {
                        return;
                    };
                    if let Err(err) = (TabbedPane { shared }).set_selected_component(&content) {
                        warn!("tab click could not select its content: {err}");
                    }
                })?;
        Ok(listener)
    }

    /// Remove a content component and its tab.
    pub fn remove(&self, target: impl Into<ChildRef>) -> Result<Component> {
        self.shared.pane.remove(target)
    }

    pub fn remove_all(&self) -> Result<Vec<Component>> {
        self.shared.pane.remove_all()
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    pub fn set_selected_index(&self, index: usize) -> Result<()> {
        self.shared.pane.show_index(index)?;
        self.sync_tabs();
        Ok(())
    }

    pub fn set_selected_component(&self, widget: &impl Widget) -> Result<()> {
        let index = self.index_of(widget).ok_or(WidgetError::NotFound)?;
        self.set_selected_index(index)
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.tabs().iter().position(Tab::is_selected)
    }

    /// Mark the tab of the visible content as the selected one.
    fn sync_tabs(&self) {
        let visible = self.shared.pane.visible_index();
        for (i, tab) in self.tabs().iter().enumerate() {
            tab.set_selected(Some(i) == visible);
        }
    }

    // -------------------------------------------------------------------------
    // Pairing
    // -------------------------------------------------------------------------

    fn take_entry(&self, matches: impl Fn(&TabEntry) -> bool) -> Option<TabEntry> {
        let mut entries = write(&self.shared.entries);
        let index = entries.iter().position(matches)?;
        let entry = entries.remove(index);
        self.document().remove_listener(entry.listener);
        Some(entry)
    }

    fn content_removed(&self, content: &Component) {
        let Some(entry) = self.take_entry(|e| e.content == *content) else {
            return;
        };
        if self.shared.strip.index_of(&entry.tab).is_some() {
            if let Err(err) = self.shared.strip.remove(&entry.tab) {
                warn!("could not remove tab of {}: {err}", content.id());
            }
        }
        self.sync_tabs();
    }

    fn tab_removed(&self, tab: &Component) {
        let Some(entry) = self.take_entry(|e| e.tab.component() == tab) else {
            return;
        };
        if self.shared.pane.index_of(&entry.content).is_some() {
            if let Err(err) = self.shared.pane.remove(&entry.content) {
                warn!("could not remove content of {}: {err}", tab.id());
            }
        }
        self.sync_tabs();
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    pub fn tab(&self, index: usize) -> Result<Tab> {
        let entries = read(&self.shared.entries);
        entries
            .get(index)
            .map(|e| e.tab.clone())
            .ok_or(WidgetError::IndexOutOfRange {
                index,
                len: entries.len(),
            })
    }

    pub fn tabs(&self) -> Vec<Tab> {
        read(&self.shared.entries)
            .iter()
            .map(|e| e.tab.clone())
            .collect()
    }

    /// Node of the row that holds the tabs. The row itself stays private
    /// so tabs and contents can only be added in pairs.
    pub fn tab_strip_node(&self) -> NodeId {
        self.shared.strip.display_node()
    }

    /// Node of the area showing the selected content.
    pub fn switch_pane_node(&self) -> NodeId {
        self.shared.pane.display_node()
    }

    pub fn index_of(&self, widget: &impl Widget) -> Option<usize> {
        self.shared.pane.index_of(widget)
    }

    pub fn component_at(&self, index: usize) -> Result<Component> {
        self.shared.pane.component_at(index)
    }

    pub fn components(&self) -> Vec<Component> {
        self.shared.pane.components()
    }

    pub fn component_count(&self) -> usize {
        self.shared.pane.component_count()
    }
}

impl Widget for TabbedPane {
    fn component(&self) -> &Component {
        self.shared.container.component()
    }
}

impl std::fmt::Debug for TabbedPane {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TabbedPane")
            .field("component", self.component())
            .field("tabs", &self.component_count())
            .finish()
    }
}

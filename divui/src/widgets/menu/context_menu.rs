use std::sync::{Arc, RwLock, Weak};

use divdom::{Document, EventKind, ListenerId, Subscription, Visibility};
use log::{debug, warn};

use super::item::ContextMenuItem;
use crate::component::{Component, Widget};
use crate::container::{Container, ContainerWidget};
use crate::error::{Result, WidgetError};
use crate::lock::{read, write};
use crate::style::Style;

struct MenuEntry<C> {
    item: ContextMenuItem<C>,
    listener: ListenerId,
}

struct MenuState<C> {
    items: Vec<MenuEntry<C>>,
    context: Option<Arc<C>>,
}

struct MenuShared<C> {
    container: Container,
    state: RwLock<MenuState<C>>,
    dismiss: RwLock<Option<Subscription>>,
}

/// A popup menu of [`ContextMenuItem`]s offering actions on some context
/// value, such as the object that was right-clicked.
///
/// The menu starts hidden. [`ContextMenu::show`] opens it at a point for a
/// context; choosing an enabled item runs its handler with that context and
/// closes the menu. A click anywhere outside the menu also closes it.
pub struct ContextMenu<C> {
    shared: Arc<MenuShared<C>>,
}

impl<C: Send + Sync + 'static> ContextMenu<C> {
    pub fn new(doc: &Document) -> Self {
        let container = Container::new(doc);
        Style::new([
            ("border-style", "outset"),
            ("border-color", "rgb(200,200,200)"),
            ("position", "absolute"),
            ("left", "0px"),
            ("top", "0px"),
            ("background-color", "rgba(200,200,200,0.7)"),
            ("visibility", "hidden"),
        ])
        .apply_to(doc, container.display_node());

        let shared = Arc::new(MenuShared {
            container,
            state: RwLock::new(MenuState {
                items: Vec::new(),
                context: None,
            }),
            dismiss: RwLock::new(None),
        });

        let weak = Arc::downgrade(&shared);
        shared.container.observe_removed(Arc::new(
            move |_: &Container, child: &Component, _: usize| {
                if let Some(shared) = weak.upgrade() {
                    ContextMenu { shared }.item_removed(child);
                }
            },
        ));

        let weak: Weak<MenuShared<C>> = Arc::downgrade(&shared);
        let subscription = doc.subscribe(EventKind::Click, move |event| {
            let Some(shared) = weak.upgrade() else {
                return;
            };
            let menu = ContextMenu { shared };
            if !menu.document().contains(menu.display_node(), event.target) {
                menu.hide();
            }
        });
        *write(&shared.dismiss) = Some(subscription);

        Self { shared }
    }

    /// Open the menu at `(x, y)` for `context`.
    ///
    /// Each item first decides from the context whether it is enabled,
    /// disabled or hidden.
    pub fn show(&self, context: C, x: i32, y: i32) {
        let context = Arc::new(context);
        let items = {
            let mut state = write(&self.shared.state);
            state.context = Some(context.clone());
            state
                .items
                .iter()
                .map(|e| e.item.clone())
                .collect::<Vec<_>>()
        };
        for item in items {
            item.refresh(&context);
        }

        let doc = self.document();
        let node = self.display_node();
        doc.set_style(node, "left", &format!("{x}px"));
        doc.set_style(node, "top", &format!("{y}px"));
        doc.set_style(node, Visibility::PROPERTY, Visibility::Visible.as_css());
        debug!("{} shown at ({x}, {y})", self.component().id());
    }

    pub fn hide(&self) {
        self.document().set_style(
            self.display_node(),
            Visibility::PROPERTY,
            Visibility::Hidden.as_css(),
        );
    }

    pub fn is_shown(&self) -> bool {
        self.document()
            .style(self.display_node(), Visibility::PROPERTY)
            .is_some_and(|v| v == Visibility::Visible.as_css())
    }

    /// The context the menu was last shown for.
    pub fn context(&self) -> Option<Arc<C>> {
        read(&self.shared.state).context.clone()
    }

    /// Add a plain component, such as a separator, that is not an item.
    pub fn add<W: Widget + Clone + Send + Sync + 'static>(&self, widget: W) -> Result<W> {
        self.shared.container.add(widget)
    }

    pub fn add_item(&self, item: ContextMenuItem<C>) -> Result<ContextMenuItem<C>> {
        let item = self.shared.container.add(item)?;

        let menu = Arc::downgrade(&self.shared);
        let target = item.downgrade();
        let listener =
            self.document()
                .add_listener(item.display_node(), EventKind::Click, move |event| {
                    event.stop_propagation();
                    let (Some(shared), Some(item)) = (menu.upgrade(), target.upgrade()) else {
                        return;
                    };
                    if !item.is_enabled() {
                        return;
                    }
                    let menu = ContextMenu { shared };
                    match menu.context() {
                        Some(context) => item.fire(&context),
                        None => warn!("menu item clicked before the menu was shown"),
                    }
                    menu.hide();
                })?;

        write(&self.shared.state).items.push(MenuEntry {
            item: item.clone(),
            listener,
        });
        Ok(item)
    }

    fn item_removed(&self, child: &Component) {
        let entry = {
            let mut state = write(&self.shared.state);
            let index = state
                .items
                .iter()
                .position(|e| e.item.component() == child);
            index.map(|i| state.items.remove(i))
        };
        if let Some(entry) = entry {
            self.document().remove_listener(entry.listener);
        }
    }

    pub fn item(&self, index: usize) -> Result<ContextMenuItem<C>> {
        let state = read(&self.shared.state);
        state
            .items
            .get(index)
            .map(|e| e.item.clone())
            .ok_or(WidgetError::IndexOutOfRange {
                index,
                len: state.items.len(),
            })
    }

    pub fn item_count(&self) -> usize {
        read(&self.shared.state).items.len()
    }

    /// Stop listening for clicks outside the menu. Dropping the last handle
    /// to the menu does the same.
    pub fn dispose(&self) {
        if let Some(mut subscription) = write(&self.shared.dismiss).take() {
            subscription.cancel();
        }
    }
}

impl<C> Widget for ContextMenu<C> {
    fn component(&self) -> &Component {
        self.shared.container.component()
    }
}

impl<C> ContainerWidget for ContextMenu<C> {
    fn container(&self) -> &Container {
        &self.shared.container
    }
}

impl<C> Clone for ContextMenu<C> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<C> std::fmt::Debug for ContextMenu<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContextMenu")
            .field("component", self.component())
            .field("items", &read(&self.shared.state).items.len())
            .finish()
    }
}

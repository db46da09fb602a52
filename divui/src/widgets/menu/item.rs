use std::sync::{Arc, RwLock, Weak};

use divdom::{Display, Document, DomEvent, EventKind};
use log::warn;

use crate::component::{Component, Widget};
use crate::lock::{read, write};

const ENABLED_COLOR: &str = "rgb(0,0,0)";
const DISABLED_COLOR: &str = "rgb(100,100,100)";

const HOVER_BACKGROUND: &str = "rgba(255,255,255,1.0)";
const IDLE_BACKGROUND: &str = "rgba(255,255,255,0.0)";
const PRESSED_BACKGROUND: &str = "rgba(100,100,200,1.0)";

/// How an item presents itself for a given context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ItemState {
    #[default]
    Enabled,
    /// Shown but greyed out. Clicking does nothing.
    Disabled,
    Hidden,
}

type ClickHandler<C> = Arc<dyn Fn(&C) + Send + Sync>;
type EnablePredicate<C> = Arc<dyn Fn(&C) -> ItemState + Send + Sync>;

struct ItemInner<C> {
    enabled: bool,
    on_click: Option<ClickHandler<C>>,
    predicate: Option<EnablePredicate<C>>,
}

pub(super) struct ItemShared<C> {
    component: Component,
    inner: RwLock<ItemInner<C>>,
}

/// One entry of a [`ContextMenu`](super::ContextMenu).
///
/// The menu passes its context of type `C` to the item's enable predicate
/// when it opens and to the click handler when the item is chosen.
pub struct ContextMenuItem<C> {
    shared: Arc<ItemShared<C>>,
}

impl<C: Send + Sync + 'static> ContextMenuItem<C> {
    pub fn new(doc: &Document, text: &str) -> Self {
        let component = Component::new(doc);
        let node = component.display_node();
        doc.set_text(node, text);
        doc.set_style(node, "cursor", "pointer");
        doc.set_style(node, "color", ENABLED_COLOR);

        let item = Self {
            shared: Arc::new(ItemShared {
                component,
                inner: RwLock::new(ItemInner {
                    enabled: true,
                    on_click: None,
                    predicate: None,
                }),
            }),
        };
        item.highlight_on(EventKind::MouseOver, |_| Some(HOVER_BACKGROUND));
        item.highlight_on(EventKind::MouseOut, |_| Some(IDLE_BACKGROUND));
        item.highlight_on(EventKind::MouseDown, |item| {
            item.is_enabled().then_some(PRESSED_BACKGROUND)
        });
        item.highlight_on(EventKind::MouseUp, |_| Some(HOVER_BACKGROUND));
        item
    }

    fn highlight_on(
        &self,
        kind: EventKind,
        background: impl Fn(&ContextMenuItem<C>) -> Option<&'static str> + Send + Sync + 'static,
    ) {
        let weak = self.downgrade();
        let handler = move |_: &mut DomEvent| {
            let Some(item) = weak.upgrade() else {
                return;
            };
            if let Some(color) = background(&item) {
                item.document()
                    .set_style(item.display_node(), "background-color", color);
            }
        };
        if let Err(err) = self
            .document()
            .add_listener(self.display_node(), kind, handler)
        {
            warn!("menu item highlight not registered: {err}");
        }
    }

    pub fn with_click_handler(self, handler: impl Fn(&C) + Send + Sync + 'static) -> Self {
        self.set_click_handler(handler);
        self
    }

    pub fn set_click_handler(&self, handler: impl Fn(&C) + Send + Sync + 'static) {
        write(&self.shared.inner).on_click = Some(Arc::new(handler));
    }

    pub fn with_enable_predicate(
        self,
        predicate: impl Fn(&C) -> ItemState + Send + Sync + 'static,
    ) -> Self {
        self.set_enable_predicate(predicate);
        self
    }

    /// Decide the item's state each time the menu opens. Without a
    /// predicate the item is always enabled.
    pub fn set_enable_predicate(&self, predicate: impl Fn(&C) -> ItemState + Send + Sync + 'static) {
        write(&self.shared.inner).predicate = Some(Arc::new(predicate));
    }

    pub fn is_enabled(&self) -> bool {
        read(&self.shared.inner).enabled
    }

    pub fn enable(&self) {
        write(&self.shared.inner).enabled = true;
        self.document()
            .set_style(self.display_node(), "color", ENABLED_COLOR);
    }

    pub fn disable(&self) {
        write(&self.shared.inner).enabled = false;
        self.document()
            .set_style(self.display_node(), "color", DISABLED_COLOR);
    }

    pub fn show(&self) {
        self.document().set_style(
            self.display_node(),
            Display::PROPERTY,
            Display::Block.as_css(),
        );
    }

    pub fn hide(&self) {
        self.document().set_style(
            self.display_node(),
            Display::PROPERTY,
            Display::None.as_css(),
        );
    }

    pub fn is_shown(&self) -> bool {
        self.document()
            .style(self.display_node(), Display::PROPERTY)
            .is_none_or(|d| d != Display::None.as_css())
    }

    /// Apply the state the predicate picks for `context`.
    pub(super) fn refresh(&self, context: &C) {
        let predicate = read(&self.shared.inner).predicate.clone();
        let state = predicate.map_or(ItemState::Enabled, |p| p(context));
        match state {
            ItemState::Enabled => {
                self.show();
                self.enable();
            }
            ItemState::Disabled => {
                self.show();
                self.disable();
            }
            ItemState::Hidden => self.hide(),
        }
    }

    pub(super) fn fire(&self, context: &C) {
        let handler = read(&self.shared.inner).on_click.clone();
        if let Some(handler) = handler {
            handler(context);
        }
    }

    pub(super) fn downgrade(&self) -> WeakItem<C> {
        WeakItem(Arc::downgrade(&self.shared))
    }
}

impl<C> Widget for ContextMenuItem<C> {
    fn component(&self) -> &Component {
        &self.shared.component
    }
}

impl<C> Clone for ContextMenuItem<C> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<C> PartialEq for ContextMenuItem<C> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }
}

impl<C> std::fmt::Debug for ContextMenuItem<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContextMenuItem")
            .field("component", &self.shared.component)
            .field("enabled", &read(&self.shared.inner).enabled)
            .finish()
    }
}

pub(super) struct WeakItem<C>(Weak<ItemShared<C>>);

impl<C> WeakItem<C> {
    pub(super) fn upgrade(&self) -> Option<ContextMenuItem<C>> {
        self.0.upgrade().map(|shared| ContextMenuItem { shared })
    }
}

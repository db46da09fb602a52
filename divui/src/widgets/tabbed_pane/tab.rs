use std::sync::{Arc, RwLock};

use divdom::Document;
use divdom::render::inner_markup;

use crate::component::{Component, OwnedWidget, Widget};
use crate::content::Content;
use crate::error::Result;
use crate::lock::{read, write};
use crate::style::Style;

fn default_base_style() -> Style {
    Style::new([
        ("float", "left"),
        ("padding-right", "10px"),
        ("padding-left", "5px"),
        ("border-top", "1px solid"),
        ("border-left", "1px solid"),
        ("border-right", "1px solid"),
        ("border-top-left-radius", "5px"),
        ("border-top-right-radius", "5px"),
        ("cursor", "pointer"),
    ])
}

fn default_selected_style() -> Style {
    Style::new([
        ("background-color", "white"),
        ("position", "relative"),
        ("top", "1px"),
    ])
}

fn default_unselected_style() -> Style {
    Style::new([
        ("background-color", "lightgrey"),
        ("padding-bottom", "1px"),
        ("position", "static"),
        ("top", "0px"),
    ])
}

/// Where a tab takes its look from. Only one mode is active at a time.
#[derive(Debug, Clone)]
enum TabStyling {
    Inline {
        base: Style,
        selected: Style,
        unselected: Style,
    },
    Classes {
        base: String,
        selected: String,
        unselected: String,
    },
}

impl Default for TabStyling {
    fn default() -> Self {
        TabStyling::Inline {
            base: default_base_style(),
            selected: default_selected_style(),
            unselected: default_unselected_style(),
        }
    }
}

#[derive(Debug, Default)]
struct TabState {
    selected: bool,
    styling: TabStyling,
}

/// A clickable header of a [`TabbedPane`](super::TabbedPane).
///
/// A tab is styled either by inline styles or by style class names, with a
/// base look plus one for each of the selected and unselected states.
/// Changing the styling re-applies it to the tab's current state.
#[derive(Debug, Clone)]
pub struct Tab {
    component: Component,
    state: Arc<RwLock<TabState>>,
    /// A widget used as the label.
    label: Option<OwnedWidget>,
}

impl Tab {
    /// An unselected tab showing `label`.
    pub fn new(doc: &Document, label: impl Into<Content>) -> Result<Self> {
        let component = Component::new(doc);
        let label = label.into();
        label.fill(doc, component.display_node())?;
        let tab = Self {
            component,
            state: Arc::new(RwLock::new(TabState::default())),
            label: label.into_widget(),
        };
        tab.apply();
        Ok(tab)
    }

    /// Markup of the tab's label.
    pub fn label(&self) -> String {
        inner_markup(self.document(), self.display_node())
    }

    /// The widget shown as the label, if the label is not plain text.
    pub fn label_widget(&self) -> Option<Component> {
        self.label.as_ref().map(|w| w.component().clone())
    }

    pub fn is_selected(&self) -> bool {
        read(&self.state).selected
    }

    pub fn set_selected(&self, selected: bool) {
        write(&self.state).selected = selected;
        self.apply();
    }

    pub fn set_base_style(&self, style: Style) {
        self.restyle_inline(|base, _, _| *base = style);
    }

    pub fn set_selected_style(&self, style: Style) {
        self.restyle_inline(|_, selected, _| *selected = style);
    }

    pub fn set_unselected_style(&self, style: Style) {
        self.restyle_inline(|_, _, unselected| *unselected = style);
    }

    /// Style the tab from style sheet classes instead of inline styles.
    pub fn set_style_classes(
        &self,
        base: impl Into<String>,
        selected: impl Into<String>,
        unselected: impl Into<String>,
    ) {
        let classes = TabStyling::Classes {
            base: base.into(),
            selected: selected.into(),
            unselected: unselected.into(),
        };
        self.restyle(|styling| *styling = classes);
    }

    /// `None` while the tab is styled by classes.
    pub fn base_style(&self) -> Option<Style> {
        match &read(&self.state).styling {
            TabStyling::Inline { base, .. } => Some(base.clone()),
            TabStyling::Classes { .. } => None,
        }
    }

    pub fn selected_style(&self) -> Option<Style> {
        match &read(&self.state).styling {
            TabStyling::Inline { selected, .. } => Some(selected.clone()),
            TabStyling::Classes { .. } => None,
        }
    }

    pub fn unselected_style(&self) -> Option<Style> {
        match &read(&self.state).styling {
            TabStyling::Inline { unselected, .. } => Some(unselected.clone()),
            TabStyling::Classes { .. } => None,
        }
    }

    /// Switching from class styling starts from empty inline styles.
    fn restyle_inline(&self, f: impl FnOnce(&mut Style, &mut Style, &mut Style)) {
        self.restyle(|styling| {
            if let TabStyling::Classes { .. } = styling {
                *styling = TabStyling::Inline {
                    base: Style::empty(),
                    selected: Style::empty(),
                    unselected: Style::empty(),
                };
            }
            if let TabStyling::Inline {
                base,
                selected,
                unselected,
            } = styling
            {
                f(base, selected, unselected);
            }
        });
    }

    fn restyle(&self, f: impl FnOnce(&mut TabStyling)) {
        let previous = {
            let mut state = write(&self.state);
            let previous = state.styling.clone();
            f(&mut state.styling);
            previous
        };
        self.clear(&previous);
        self.apply();
    }

    /// Take everything `styling` put on the node back off.
    fn clear(&self, styling: &TabStyling) {
        let doc = self.document();
        let node = self.display_node();
        match styling {
            TabStyling::Inline {
                base,
                selected,
                unselected,
            } => {
                for style in [base, selected, unselected] {
                    style.remove_from(doc, node);
                }
            }
            TabStyling::Classes { .. } => doc.set_class_name(node, ""),
        }
    }

    fn apply(&self) {
        let doc = self.document();
        let node = self.display_node();
        let state = read(&self.state);
        match &state.styling {
            TabStyling::Inline {
                base,
                selected,
                unselected,
            } => {
                let (current, other) = if state.selected {
                    (selected, unselected)
                } else {
                    (unselected, selected)
                };
                other.remove_from(doc, node);
                base.apply_to(doc, node);
                current.apply_to(doc, node);
            }
            TabStyling::Classes {
                base,
                selected,
                unselected,
            } => {
                let current = if state.selected { selected } else { unselected };
                let classes = [base.as_str(), current.as_str()]
                    .into_iter()
                    .filter(|c| !c.trim().is_empty())
                    .collect::<Vec<_>>()
                    .join(" ");
                doc.set_class_name(node, &classes);
            }
        }
    }
}

impl Widget for Tab {
    fn component(&self) -> &Component {
        &self.component
    }
}

impl PartialEq for Tab {
    fn eq(&self, other: &Self) -> bool {
        self.component == other.component
    }
}

impl Eq for Tab {}

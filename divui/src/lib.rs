//! A small widget toolkit over a [`divdom::Document`].
//!
//! Applications build a tree bottom-up from [`Component`]s and
//! [`Container`]s, then mutate it imperatively (add, remove, show, sort) in
//! response to events the host dispatches into the document.

pub mod component;
pub mod container;
pub mod content;
pub mod error;
mod lock;
pub mod style;
pub mod widgets;

pub use component::{Component, ComponentId, OwnedWidget, WeakComponent, Widget};
pub use container::{ChildRef, Container, ContainerWidget, WeakContainer};
pub use content::Content;
pub use error::{Result, WidgetError};
pub use style::Style;

pub mod prelude {
    pub use crate::component::{Component, Widget};
    pub use crate::container::{ChildRef, Container, ContainerWidget};
    pub use crate::content::Content;
    pub use crate::error::{Result, WidgetError};
    pub use crate::style::Style;
    pub use crate::widgets::{
        Column, ContextMenu, ContextMenuItem, ItemState, Label, OptionSpec, OptionsTable, Row,
        ScrollPane, ScrollPolicy, SwitchPane, Tab, TabbedPane, Table,
    };

    pub use divdom::{Document, EventKind, NodeId, TextAlign};
}

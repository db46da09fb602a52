//! Ready-made widgets.

mod label;
pub mod menu;
pub mod options_table;
mod scroll_pane;
mod switch_pane;
pub mod tabbed_pane;
pub mod table;

pub use label::Label;
pub use menu::{ContextMenu, ContextMenuItem, ItemState};
pub use options_table::{OptionSettings, OptionSpec, OptionsTable, ParamSpec};
pub use scroll_pane::{ScrollPane, ScrollPolicy};
pub use switch_pane::SwitchPane;
pub use tabbed_pane::{Tab, TabbedPane};
pub use table::{Column, Comparator, Row, Table};

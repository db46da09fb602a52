//! Context menu - a popup list of items that act on whatever the menu was
//! opened for.

mod context_menu;
mod item;

pub use context_menu::ContextMenu;
pub use item::{ContextMenuItem, ItemState};

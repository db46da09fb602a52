pub mod document;
pub mod element;
pub mod error;
pub mod event;
pub mod hit;
pub mod layout;
pub mod render;
pub mod types;

pub use document::{Document, WeakDocument};
pub use element::{Node, NodeId};
pub use error::DomError;
pub use event::{DomEvent, EventKind, Handler, ListenerId, MouseButton, Subscription};
pub use hit::hit_test;
pub use layout::Rect;
pub use types::*;

mod node;

pub use node::{Node, NodeId};

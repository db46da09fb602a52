use thiserror::Error;

use crate::element::NodeId;

/// Errors raised by structural document operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    #[error("node {0} does not belong to this document")]
    UnknownNode(NodeId),

    #[error("node {child} is not a child of {parent}")]
    NotAChild { parent: NodeId, child: NodeId },

    /// Inserting `child` under `parent` would make a node its own ancestor.
    #[error("cannot insert {child} into its own subtree at {parent}")]
    HierarchyRequest { parent: NodeId, child: NodeId },
}

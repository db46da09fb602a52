//! Widget error types.

use divdom::{DomError, ParseKeywordError};
use thiserror::Error;

/// Errors raised by structural widget operations.
///
/// An operation that returns an error has not mutated the widget tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WidgetError {
    /// The component is not a child of the container it was looked up in.
    #[error("component not found")]
    NotFound,

    #[error("index {index} out of range for {len} entries")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("column `{0}` already exists")]
    DuplicateColumn(String),

    #[error("no column `{0}`")]
    UnknownColumn(String),

    #[error(transparent)]
    Dom(#[from] DomError),
}

impl From<ParseKeywordError> for WidgetError {
    fn from(err: ParseKeywordError) -> Self {
        Self::InvalidArgument(err.to_string())
    }
}

pub type Result<T, E = WidgetError> = std::result::Result<T, E>;

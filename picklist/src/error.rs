//! Widget error types.

use thiserror::Error;
use tuidom::{DomError, KeyParseError};

/// Errors returned by [`Items`](crate::Items) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItemsError {
    /// An index outside the current item sequence was requested.
    #[error("index {index} out of bounds for {len} item(s)")]
    IndexOutOfBounds {
        /// The requested index.
        index: usize,
        /// Number of items at the time of the call.
        len: usize,
    },

    /// The document rejected an operation.
    #[error(transparent)]
    Dom(#[from] DomError),

    /// A configured key combo could not be parsed.
    #[error("invalid key binding: {0}")]
    KeyBinding(#[from] KeyParseError),
}

//! Error types for recitation-core.

use thiserror::Error;

/// Result type alias using RecitationError.
pub type Result<T> = std::result::Result<T, RecitationError>;

/// Errors from index-based lookups into parsed content.
///
/// Parsing and evaluation themselves never fail; malformed lines are dropped
/// and empty attempts produce a diagnostic.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecitationError {
    #[error("line {index} out of range (item has {len} lines)")]
    LineOutOfRange { index: usize, len: usize },

    #[error("item {index} out of range (document has {len} items)")]
    ItemOutOfRange { index: usize, len: usize },
}

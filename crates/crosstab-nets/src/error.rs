//! Net error types

use thiserror::Error;

/// Result type for net operations
pub type NetResult<T> = std::result::Result<T, NetError>;

/// Errors from net collection edits and draft conversion.
///
/// Validation itself never fails; it returns a list of problems instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NetError {
    #[error("Net index {index} out of bounds (question has {len} nets)")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Invalid net: {}", .problems.join("; "))]
    InvalidDraft { problems: Vec<String> },
}

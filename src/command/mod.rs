mod commands;
mod history;

pub use commands::Command;
pub use history::{CommandHistory, HistoryState};

use crate::path::PathId;

/// Result type for command operations
pub type CommandResult = Result<(), CommandError>;

/// Errors raised when a command's preconditions do not hold.
///
/// These indicate a caller bug in the presentation layer (issuing a
/// point-level command with no active path, for instance), not a recoverable
/// runtime condition. A failed command leaves document and history untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// A point-level command was issued with no active path
    #[error("no active path")]
    NoActivePath,
    /// The command referenced a path that is not in the document
    #[error("path {0} not found")]
    PathNotFound(PathId),
    /// A point index past the end of the path's point list
    #[error("point index {index} out of bounds for path with {len} points")]
    PointOutOfBounds { index: usize, len: usize },
}

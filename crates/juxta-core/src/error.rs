//! Error types for wire value parsing.

use thiserror::Error;

/// A delta action segment was not one of the supported actions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unexpected comparison action")]
pub struct ParseActionError {
    /// Raw value supplied by the caller.
    pub value: String,
}

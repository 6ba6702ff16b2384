//! Dataset error types.

use eqgraph_core::CoreError;
use thiserror::Error;

/// Errors produced while extracting, evaluating, linking, or loading
/// equation records.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// A regular-expression pattern failed to compile (discovered function
    /// names are spliced into the operator pattern at runtime).
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Graph construction rejected an edge.
    #[error("graph construction failed: {0}")]
    Graph(#[from] CoreError),

    /// An expression is not plain arithmetic and cannot be evaluated.
    #[error("cannot evaluate '{expression}': {reason}")]
    Evaluation { expression: String, reason: String },

    /// Reading or writing a sample file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A sample file does not parse as the expected JSON shape.
    #[error("malformed sample file: {0}")]
    Json(#[from] serde_json::Error),
}

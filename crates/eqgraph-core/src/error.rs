//! Core error types for eqgraph-core.
//!
//! Uses `thiserror` for structured, matchable error variants covering
//! the failure modes of the graph data model.

use crate::id::NodeId;
use thiserror::Error;

/// Core errors produced by the eqgraph-core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A node index was not found in the graph.
    #[error("node not found: NodeId({id})", id = id.0)]
    NodeNotFound { id: NodeId },

    /// An edge failed validation.
    #[error("invalid edge: {reason}")]
    InvalidEdge { reason: String },
}

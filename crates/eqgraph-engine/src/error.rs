//! Engine error types.
//!
//! Both conditions are local to a single group: the engine reports them
//! per group and keeps processing the remaining groups, so one degenerate
//! component never poisons an otherwise healthy graph.

use eqgraph_core::NodeId;
use serde::{Deserialize, Serialize};

/// Errors produced by the analysis algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum EngineError {
    /// A group contains a dependency cycle.
    ///
    /// From the sequencer (strict mode): the queue drained before covering
    /// the group, and `node` is the first member in discovery order that
    /// never reached in-degree zero. From the chain builder: `node` was
    /// reached twice on one root-to-ancestor path.
    #[error("cycle detected in group {group} at node {node}")]
    CycleDetected { group: usize, node: NodeId },

    /// A group has no node with an empty successor list, so no chain root
    /// exists within it.
    #[error("no terminal node in group {group}: every member has an outgoing edge")]
    NoTerminalFound { group: usize },
}

impl EngineError {
    /// Index of the group the error belongs to.
    pub fn group(&self) -> usize {
        match self {
            EngineError::CycleDetected { group, .. } => *group,
            EngineError::NoTerminalFound { group } => *group,
        }
    }
}

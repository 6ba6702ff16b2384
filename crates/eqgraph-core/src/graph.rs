//! The equation dependency graph container.
//!
//! [`EquationGraph`] wraps a directed petgraph [`Graph`] whose nodes are
//! [`EquationNode`] payloads and whose edges carry an `f64` weight. The weight
//! accompanies the edge for display and future scoring but has no algorithmic
//! meaning: analysis treats edges as pure presence.
//!
//! Two ordering guarantees matter to downstream consumers:
//!
//! - Node ids are dense and zero-based, assigned in insertion order, never
//!   reused (there is no removal API).
//! - [`successors`](EquationGraph::successors) returns targets in edge
//!   insertion order. petgraph walks a node's outgoing edge list newest
//!   first, so the wrapper restores insertion order before returning.

use petgraph::graph::{Graph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Directed;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::id::{EdgeId, NodeId};
use crate::node::EquationNode;
use crate::view::{GraphView, SuccessorList};

/// A directed graph of computation steps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EquationGraph {
    inner: Graph<EquationNode, f64, Directed, u32>,
}

impl EquationGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        EquationGraph {
            inner: Graph::new(),
        }
    }

    /// Adds a node, returning its dense zero-based id.
    pub fn add_node(&mut self, node: EquationNode) -> NodeId {
        NodeId::from(self.inner.add_node(node))
    }

    /// Convenience: adds a node from its display value.
    pub fn add_value(&mut self, value: impl Into<String>) -> NodeId {
        self.add_node(EquationNode::new(value))
    }

    /// Adds a directed dependency edge `from -> to`.
    ///
    /// Both nodes must exist. Adding an edge that already exists updates its
    /// weight in place and keeps the edge's original position in the
    /// successor order, so multiplicity collapses to presence. Self-edges are
    /// permitted.
    pub fn add_dependency(
        &mut self,
        from: NodeId,
        to: NodeId,
        weight: f64,
    ) -> Result<EdgeId, CoreError> {
        let from_idx: NodeIndex<u32> = from.into();
        let to_idx: NodeIndex<u32> = to.into();

        if self.inner.node_weight(from_idx).is_none() {
            return Err(CoreError::NodeNotFound { id: from });
        }
        if self.inner.node_weight(to_idx).is_none() {
            return Err(CoreError::NodeNotFound { id: to });
        }

        let idx = self.inner.update_edge(from_idx, to_idx, weight);
        Ok(EdgeId::from(idx))
    }

    /// Returns `true` if the edge `from -> to` exists.
    pub fn has_dependency(&self, from: NodeId, to: NodeId) -> bool {
        self.inner.find_edge(from.into(), to.into()).is_some()
    }

    /// Returns the weight of the edge `from -> to`, if present.
    pub fn dependency_weight(&self, from: NodeId, to: NodeId) -> Option<f64> {
        self.inner
            .find_edge(from.into(), to.into())
            .and_then(|e| self.inner.edge_weight(e))
            .copied()
    }

    /// Looks up a node payload by id.
    pub fn node(&self, id: NodeId) -> Option<&EquationNode> {
        self.inner.node_weight(id.into())
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Successors of `id` in edge insertion order.
    pub fn successors(&self, id: NodeId) -> SuccessorList {
        let idx: NodeIndex<u32> = id.into();
        let mut out: SuccessorList = self
            .inner
            .edges(idx)
            .map(|e| NodeId::from(e.target()))
            .collect();
        // petgraph yields outgoing edges newest first; restore insertion order.
        out.reverse();
        out
    }
}

impl GraphView for EquationGraph {
    fn node_count(&self) -> usize {
        self.node_count()
    }

    fn value(&self, id: NodeId) -> &str {
        &self.inner[NodeIndex::<u32>::from(id)].value
    }

    fn successors(&self, id: NodeId) -> SuccessorList {
        EquationGraph::successors(self, id)
    }
}

//! Read-only graph contract consumed by the analysis algorithms.
//!
//! [`GraphView`] is the seam between graph construction (which decides which
//! edges exist) and graph analysis (which only walks them). Algorithms take
//! `&impl GraphView`, so any indexed node collection with ordered successor
//! lists can be analyzed -- the petgraph-backed [`EquationGraph`] is the
//! canonical implementation.
//!
//! [`EquationGraph`]: crate::graph::EquationGraph

use smallvec::SmallVec;

use crate::id::NodeId;

/// Ordered successor list of one node. Most equations feed only a handful of
/// later steps, so the common case stays on the stack.
pub type SuccessorList = SmallVec<[NodeId; 8]>;

/// An indexed, read-only view of a directed graph.
///
/// Indices are stable, dense, and zero-based: every `NodeId(i)` with
/// `i < node_count()` is a valid node. Successor lists are ordered (edge
/// insertion order) and free of duplicates -- edge multiplicity is collapsed
/// to presence by the graph builder.
pub trait GraphView {
    /// Number of nodes in the graph.
    fn node_count(&self) -> usize;

    /// Display value of a node.
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of bounds. Callers iterate `0..node_count()`.
    fn value(&self, id: NodeId) -> &str;

    /// Successors of a node, in edge insertion order.
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of bounds.
    fn successors(&self, id: NodeId) -> SuccessorList;
}

//! Weakly-connected component discovery.
//!
//! [`classify`] partitions a graph's nodes into dependency groups and builds
//! the reverse-adjacency index shared by the sequencer and the chain builder.
//! Edges are treated as undirected for grouping only: two steps belong to the
//! same group when some chain of dependencies connects them in either
//! direction.
//!
//! Every ordering here is deterministic. Reverse adjacency records
//! predecessors in the order their edges are discovered while scanning nodes
//! `0..n`; groups are emitted in ascending order of their starting index and
//! list members in breadth-first discovery order.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use eqgraph_core::{GraphView, NodeId};

/// Per-node predecessor lists, index-parallel with the graph's nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReverseAdjacency {
    preds: Vec<Vec<NodeId>>,
}

impl ReverseAdjacency {
    /// Builds the index with one pass over every node's successor list.
    pub fn from_graph<G: GraphView>(graph: &G) -> Self {
        let mut preds = vec![Vec::new(); graph.node_count()];
        for i in 0..graph.node_count() {
            let id = NodeId(i as u32);
            for succ in graph.successors(id) {
                preds[succ.index()].push(id);
            }
        }
        ReverseAdjacency { preds }
    }

    /// Predecessors of `id`, in edge discovery order.
    pub fn predecessors(&self, id: NodeId) -> &[NodeId] {
        &self.preds[id.index()]
    }

    /// Number of incoming edges of `id`.
    pub fn in_degree(&self, id: NodeId) -> usize {
        self.preds[id.index()].len()
    }

    /// Number of nodes covered by the index.
    pub fn node_count(&self) -> usize {
        self.preds.len()
    }
}

/// Output of [`classify`]: the groups and the reverse-adjacency index they
/// were discovered with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Weakly-connected groups, each listing members in breadth-first
    /// discovery order. Together they partition `0..node_count`.
    pub groups: Vec<Vec<NodeId>>,
    /// Predecessor index over the whole graph.
    pub reverse: ReverseAdjacency,
}

/// Discovers the weakly-connected groups of `graph`.
///
/// Breadth-first search starts from the lowest unvisited index; the frontier
/// of each dequeued node is its successors (stored order) followed by its
/// predecessors (reverse-adjacency order), skipping visited nodes. Nodes are
/// marked visited as they are dequeued, so duplicate queue entries and
/// self-edges are harmless. An isolated node forms a singleton group.
///
/// Runs in O(V + E) and has no failure modes.
pub fn classify<G: GraphView>(graph: &G) -> Classification {
    let reverse = ReverseAdjacency::from_graph(graph);
    let n = graph.node_count();

    let mut visited = vec![false; n];
    let mut groups = Vec::new();

    for start in 0..n {
        if visited[start] {
            continue;
        }

        let mut group = Vec::new();
        let mut queue = VecDeque::new();
        queue.push_back(NodeId(start as u32));

        while let Some(current) = queue.pop_front() {
            if visited[current.index()] {
                continue;
            }
            visited[current.index()] = true;
            group.push(current);

            for next in graph.successors(current) {
                if !visited[next.index()] {
                    queue.push_back(next);
                }
            }
            for &next in reverse.predecessors(current) {
                if !visited[next.index()] {
                    queue.push_back(next);
                }
            }
        }

        groups.push(group);
    }

    Classification { groups, reverse }
}

//! Per-group topological sequencing (Kahn's algorithm).
//!
//! Each group is sequenced independently against the shared reverse-adjacency
//! index. The global index is safe to reuse because a weakly-connected group
//! contains every predecessor and successor of its members.
//!
//! The tie-break rule is fixed: the queue is seeded with zero-in-degree nodes
//! in the order they occur in the group's discovery order, and processed
//! FIFO. This keeps orderings reproducible across runs.

use std::collections::VecDeque;

use indexmap::IndexMap;

use eqgraph_core::{GraphView, NodeId};

use crate::classify::ReverseAdjacency;
use crate::error::EngineError;
use crate::EngineConfig;

/// Computes one topological ordering per group, index-aligned with `groups`.
///
/// For an acyclic group the ordering covers the whole group and respects
/// every in-group edge. For a cyclic group the queue drains early and the
/// ordering comes back shorter than the group; in strict mode that group
/// yields [`EngineError::CycleDetected`] instead. Either way each group is
/// processed on its own -- a cyclic group never aborts its siblings.
pub fn sequence<G: GraphView>(
    groups: &[Vec<NodeId>],
    graph: &G,
    reverse: &ReverseAdjacency,
    config: &EngineConfig,
) -> Vec<Result<Vec<NodeId>, EngineError>> {
    groups
        .iter()
        .enumerate()
        .map(|(group_index, group)| sequence_group(group_index, group, graph, reverse, config))
        .collect()
}

fn sequence_group<G: GraphView>(
    group_index: usize,
    group: &[NodeId],
    graph: &G,
    reverse: &ReverseAdjacency,
    config: &EngineConfig,
) -> Result<Vec<NodeId>, EngineError> {
    // Insertion-ordered so that seeding below follows discovery order.
    let mut in_degree: IndexMap<NodeId, usize> = group
        .iter()
        .map(|&id| (id, reverse.in_degree(id)))
        .collect();

    let mut queue: VecDeque<NodeId> = in_degree
        .iter()
        .filter(|(_, &degree)| degree == 0)
        .map(|(&id, _)| id)
        .collect();

    let mut ordering = Vec::with_capacity(group.len());
    while let Some(id) = queue.pop_front() {
        ordering.push(id);

        for succ in graph.successors(id) {
            if let Some(degree) = in_degree.get_mut(&succ) {
                *degree -= 1;
                if *degree == 0 {
                    queue.push_back(succ);
                }
            }
        }
    }

    if config.strict && ordering.len() < group.len() {
        let node = group
            .iter()
            .copied()
            .find(|id| in_degree.get(id).map_or(false, |&degree| degree > 0));
        if let Some(node) = node {
            return Err(EngineError::CycleDetected {
                group: group_index,
                node,
            });
        }
    }

    Ok(ordering)
}

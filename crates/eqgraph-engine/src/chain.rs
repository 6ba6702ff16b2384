//! Ancestor chain reconstruction.
//!
//! For each group, [`build_chains`] locates the group's terminal step (the
//! first member in discovery order with no outgoing edge) and expands its
//! ancestry: a node's children are its direct predecessors, recursively, so
//! the tree reads root-first from final result back to the inputs that
//! produced it.
//!
//! Expansion runs on an explicit work stack with an on-path marker per node.
//! Only the current root-to-node path is guarded: a step that feeds two
//! different consumers legitimately appears once under each, but a
//! predecessor loop fails with [`EngineError::CycleDetected`] instead of
//! growing the stack forever.

use serde::{Deserialize, Serialize};

use eqgraph_core::{GraphView, NodeId};

use crate::classify::ReverseAdjacency;
use crate::error::EngineError;
use crate::EngineConfig;

/// A rooted ancestor tree over one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainTree {
    /// The step this tree node stands for.
    pub index: NodeId,
    /// Direct predecessors, in reverse-adjacency order, each expanded into
    /// its own ancestor tree.
    pub children: Vec<ChainTree>,
}

impl ChainTree {
    /// A tree node with no ancestors.
    pub fn leaf(index: NodeId) -> Self {
        ChainTree {
            index,
            children: Vec::new(),
        }
    }

    /// Number of tree nodes, duplicates included.
    pub fn size(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }
}

/// Builds one ancestor chain tree per group, index-aligned with `groups`.
///
/// A group whose every member has an outgoing edge has no terminal to root
/// the chain at. By default that group yields
/// [`EngineError::NoTerminalFound`]. With
/// [`legacy_terminal_fallback`](EngineConfig::legacy_terminal_fallback) set,
/// the historical behavior is reproduced instead: global node 0 -- which
/// need not belong to the group at all -- is substituted as the root.
///
/// Failures are per group; sibling groups always get their chains.
pub fn build_chains<G: GraphView>(
    groups: &[Vec<NodeId>],
    graph: &G,
    reverse: &ReverseAdjacency,
    config: &EngineConfig,
) -> Vec<Result<ChainTree, EngineError>> {
    groups
        .iter()
        .enumerate()
        .map(|(group_index, group)| build_chain(group_index, group, graph, reverse, config))
        .collect()
}

fn build_chain<G: GraphView>(
    group_index: usize,
    group: &[NodeId],
    graph: &G,
    reverse: &ReverseAdjacency,
    config: &EngineConfig,
) -> Result<ChainTree, EngineError> {
    let terminal = group
        .iter()
        .copied()
        .find(|&id| graph.successors(id).is_empty());

    let root = match terminal {
        Some(id) => id,
        None if config.legacy_terminal_fallback => NodeId(0),
        None => return Err(EngineError::NoTerminalFound { group: group_index }),
    };

    expand(group_index, root, reverse)
}

/// One in-progress tree node on the work stack.
struct Frame {
    index: NodeId,
    next_child: usize,
    children: Vec<ChainTree>,
}

impl Frame {
    fn new(index: NodeId) -> Self {
        Frame {
            index,
            next_child: 0,
            children: Vec::new(),
        }
    }
}

fn expand(
    group_index: usize,
    root: NodeId,
    reverse: &ReverseAdjacency,
) -> Result<ChainTree, EngineError> {
    let mut on_path = vec![false; reverse.node_count()];
    on_path[root.index()] = true;

    let mut stack = vec![Frame::new(root)];

    while let Some(mut frame) = stack.pop() {
        let preds = reverse.predecessors(frame.index);

        if frame.next_child < preds.len() {
            let child = preds[frame.next_child];
            frame.next_child += 1;
            stack.push(frame);

            if on_path[child.index()] {
                return Err(EngineError::CycleDetected {
                    group: group_index,
                    node: child,
                });
            }
            on_path[child.index()] = true;
            stack.push(Frame::new(child));
        } else {
            on_path[frame.index.index()] = false;
            let tree = ChainTree {
                index: frame.index,
                children: frame.children,
            };
            match stack.last_mut() {
                Some(parent) => parent.children.push(tree),
                None => return Ok(tree),
            }
        }
    }

    unreachable!("the root frame returns before the work stack drains")
}

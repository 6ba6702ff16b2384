//! Chain tree rendering.
//!
//! Pre-order, depth-first text dump of a [`ChainTree`]: one line per tree
//! node, `index: value`, indented one tab per ancestry level, children in
//! stored order. This is the only human-facing surface of the engine and the
//! traversal order is part of the contract -- tests compare the text.

use std::fmt::Write as _;

use eqgraph_core::{GraphView, NodeId};

use crate::chain::ChainTree;

/// Renders a chain tree to text.
pub fn render<G: GraphView>(tree: &ChainTree, graph: &G) -> String {
    let mut out = String::new();

    let mut stack: Vec<(&ChainTree, usize)> = vec![(tree, 0)];
    while let Some((node, depth)) = stack.pop() {
        render_line(&mut out, node.index, depth, graph);
        for child in node.children.iter().rev() {
            stack.push((child, depth + 1));
        }
    }

    out
}

fn render_line<G: GraphView>(out: &mut String, index: NodeId, depth: usize, graph: &G) {
    for _ in 0..depth {
        out.push('\t');
    }
    // Writing into a String cannot fail.
    let _ = writeln!(out, "{}: {}", index, graph.value(index));
}

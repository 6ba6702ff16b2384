//! End-to-end scenarios through the public engine API: classify, sequence,
//! build chains, render -- the same pipeline the CLI drives.

use eqgraph_core::{EquationGraph, NodeId};
use eqgraph_engine::{
    build_chains, classify, render, sequence, ChainTree, EngineConfig, EngineError,
};

fn graph_with_edges(values: &[&str], edges: &[(u32, u32)]) -> EquationGraph {
    let mut graph = EquationGraph::new();
    for value in values {
        graph.add_value(*value);
    }
    for &(a, b) in edges {
        graph.add_dependency(NodeId(a), NodeId(b), 1.0).unwrap();
    }
    graph
}

fn ids(indices: &[u32]) -> Vec<NodeId> {
    indices.iter().copied().map(NodeId).collect()
}

// ---------------------------------------------------------------------------
// 1. Fan-in: two steps feed one final step
// ---------------------------------------------------------------------------

#[test]
fn fan_in_full_pipeline() {
    let graph = graph_with_edges(&["4*5=20", "30/2=15", "20+15=35"], &[(0, 2), (1, 2)]);
    let config = EngineConfig::default();

    let c = classify(&graph);
    // Breadth-first from 0: the sink is reached first, then through its
    // predecessors the second source.
    assert_eq!(c.groups, vec![ids(&[0, 2, 1])]);
    assert_eq!(c.reverse.predecessors(NodeId(2)), &ids(&[0, 1])[..]);
    assert!(c.reverse.predecessors(NodeId(0)).is_empty());

    let orderings = sequence(&c.groups, &graph, &c.reverse, &config);
    assert_eq!(orderings[0].as_ref().unwrap(), &ids(&[0, 1, 2]));

    let chains = build_chains(&c.groups, &graph, &c.reverse, &config);
    let expected = ChainTree {
        index: NodeId(2),
        children: vec![ChainTree::leaf(NodeId(0)), ChainTree::leaf(NodeId(1))],
    };
    assert_eq!(chains[0].as_ref().unwrap(), &expected);

    let text = render(chains[0].as_ref().unwrap(), &graph);
    assert_eq!(text, "2: 20+15=35\n\t0: 4*5=20\n\t1: 30/2=15\n");
}

// ---------------------------------------------------------------------------
// 2. Disjoint groups: two independent two-step chains
// ---------------------------------------------------------------------------

#[test]
fn disjoint_groups_full_pipeline() {
    let graph = graph_with_edges(
        &["2+2=4", "4*3=12", "10-1=9", "9/3=3"],
        &[(0, 1), (2, 3)],
    );
    let config = EngineConfig::default();

    let c = classify(&graph);
    assert_eq!(c.groups, vec![ids(&[0, 1]), ids(&[2, 3])]);

    // No index appears in more than one group.
    let mut all: Vec<NodeId> = c.groups.iter().flatten().copied().collect();
    all.sort();
    all.dedup();
    assert_eq!(all.len(), 4);

    let orderings = sequence(&c.groups, &graph, &c.reverse, &config);
    assert_eq!(orderings[0].as_ref().unwrap(), &ids(&[0, 1]));
    assert_eq!(orderings[1].as_ref().unwrap(), &ids(&[2, 3]));

    let chains = build_chains(&c.groups, &graph, &c.reverse, &config);
    assert_eq!(chains[0].as_ref().unwrap().index, NodeId(1));
    assert_eq!(chains[1].as_ref().unwrap().index, NodeId(3));

    assert_eq!(
        render(chains[1].as_ref().unwrap(), &graph),
        "3: 9/3=3\n\t2: 10-1=9\n"
    );
}

// ---------------------------------------------------------------------------
// 3. Cycle: two steps that each consume the other
// ---------------------------------------------------------------------------

#[test]
fn two_cycle_permissive_pipeline() {
    let graph = graph_with_edges(&["x", "y"], &[(0, 1), (1, 0)]);
    let config = EngineConfig::default();

    let c = classify(&graph);
    assert_eq!(c.groups, vec![ids(&[0, 1])]);

    // No node ever reaches in-degree zero: the ordering is empty.
    let orderings = sequence(&c.groups, &graph, &c.reverse, &config);
    assert_eq!(orderings[0].as_ref().unwrap().len(), 0);

    // No sink inside the group either.
    let chains = build_chains(&c.groups, &graph, &c.reverse, &config);
    assert_eq!(chains[0], Err(EngineError::NoTerminalFound { group: 0 }));
}

#[test]
fn two_cycle_strict_pipeline() {
    let graph = graph_with_edges(&["x", "y"], &[(0, 1), (1, 0)]);
    let config = EngineConfig {
        strict: true,
        ..EngineConfig::default()
    };

    let c = classify(&graph);
    let orderings = sequence(&c.groups, &graph, &c.reverse, &config);
    assert_eq!(
        orderings[0],
        Err(EngineError::CycleDetected {
            group: 0,
            node: NodeId(0)
        })
    );
}

// ---------------------------------------------------------------------------
// 4. Mixed graph: healthy groups keep working next to a degenerate one
// ---------------------------------------------------------------------------

#[test]
fn degenerate_group_does_not_poison_siblings() {
    let graph = graph_with_edges(
        &["a", "b", "c", "d", "e"],
        &[(0, 1), (2, 3), (3, 2), (4, 4)],
    );
    let config = EngineConfig {
        strict: true,
        ..EngineConfig::default()
    };

    let c = classify(&graph);
    assert_eq!(c.groups, vec![ids(&[0, 1]), ids(&[2, 3]), ids(&[4])]);

    let orderings = sequence(&c.groups, &graph, &c.reverse, &config);
    assert_eq!(orderings[0].as_ref().unwrap(), &ids(&[0, 1]));
    assert!(orderings[1].is_err());
    assert!(orderings[2].is_err()); // the self-loop is a one-node cycle

    let chains = build_chains(&c.groups, &graph, &c.reverse, &config);
    assert_eq!(chains[0].as_ref().unwrap().index, NodeId(1));
    assert!(chains[1].is_err());
    assert!(chains[2].is_err());
}

// ---------------------------------------------------------------------------
// 5. Legacy substitute root for sinkless groups
// ---------------------------------------------------------------------------

#[test]
fn legacy_fallback_reproduces_the_substitute_root() {
    let graph = graph_with_edges(&["a", "b", "c", "d"], &[(0, 1), (2, 3), (3, 2)]);
    let config = EngineConfig {
        legacy_terminal_fallback: true,
        ..EngineConfig::default()
    };

    let c = classify(&graph);
    let chains = build_chains(&c.groups, &graph, &c.reverse, &config);

    // Group 1 has no sink; the substitute root is global node 0, which
    // belongs to group 0 and has no ancestors of its own.
    assert_eq!(chains[1].as_ref().unwrap(), &ChainTree::leaf(NodeId(0)));
}

// ---------------------------------------------------------------------------
// 6. Deep chain: the work-stack expansion handles depth a recursive
//    implementation could not
// ---------------------------------------------------------------------------

#[test]
fn deep_linear_chain_builds_and_renders() {
    const N: u32 = 50_000;
    let mut graph = EquationGraph::new();
    for i in 0..N {
        graph.add_value(format!("step{}", i));
    }
    for i in 0..N - 1 {
        graph.add_dependency(NodeId(i), NodeId(i + 1), 1.0).unwrap();
    }
    let config = EngineConfig::default();

    let c = classify(&graph);
    assert_eq!(c.groups.len(), 1);

    let orderings = sequence(&c.groups, &graph, &c.reverse, &config);
    assert_eq!(orderings[0].as_ref().unwrap().len(), N as usize);

    let chains = build_chains(&c.groups, &graph, &c.reverse, &config);
    let tree = chains[0].as_ref().unwrap();
    assert_eq!(tree.index, NodeId(N - 1));
    assert_eq!(tree.size(), N as usize);

    let text = render(tree, &graph);
    assert_eq!(text.lines().count(), N as usize);
}

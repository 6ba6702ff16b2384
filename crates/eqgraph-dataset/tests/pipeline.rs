//! End-to-end pipeline: raw annotated chains through extraction, linking,
//! and the full graph analysis, down to rendered chain text.

use eqgraph_core::{GraphView, NodeId};
use eqgraph_dataset::{build_graph, combine_samples, ChainExtractor};
use eqgraph_engine::{build_chains, classify, render, sequence, EngineConfig};

fn chain(parts: &[(&str, &str)]) -> String {
    parts
        .iter()
        .map(|(e, s)| {
            format!(
                r#"<gadget id="calculator">{}</gadget> <output>{}</output>"#,
                e, s
            )
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[test]
fn worked_problem_renders_its_full_ancestry() {
    // A three-step worked problem: each step consumes the previous result.
    let raw = chain(&[("100 - 40", "60"), ("60 / 2", "30"), ("30 + 5", "35")]);

    let mut extractor = ChainExtractor::new().unwrap();
    let sample = extractor.process_chain(&raw).unwrap();
    assert_eq!(sample.len(), 3);

    let graph = build_graph(&sample).unwrap();
    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 2);

    let config = EngineConfig::default();
    let classification = classify(&graph);
    assert_eq!(
        classification.groups,
        vec![vec![NodeId(0), NodeId(1), NodeId(2)]]
    );

    let orderings = sequence(
        &classification.groups,
        &graph,
        &classification.reverse,
        &config,
    );
    assert_eq!(
        orderings[0].as_ref().unwrap(),
        &vec![NodeId(0), NodeId(1), NodeId(2)]
    );

    let chains = build_chains(
        &classification.groups,
        &graph,
        &classification.reverse,
        &config,
    );
    let tree = chains[0].as_ref().unwrap();
    assert_eq!(tree.index, NodeId(2));

    assert_eq!(
        render(tree, &graph),
        "2: 30+5=35\n\t1: 60/2=30\n\t\t0: 100-40=60\n"
    );
}

#[test]
fn combined_problems_stay_in_separate_groups() {
    // Two worked problems with no shared values; record order is shuffled
    // by the combiner, so assertions avoid fixed indices.
    let raw_a = chain(&[("100 - 40", "60"), ("60 / 2", "30"), ("30 + 5", "35")]);
    let raw_b = chain(&[("7 * 3", "21"), ("21 + 4", "25")]);

    let mut extractor = ChainExtractor::new().unwrap();
    let sample_a = extractor.process_chain(&raw_a).unwrap();
    let sample_b = extractor.process_chain(&raw_b).unwrap();

    let combined = combine_samples(&[sample_a, sample_b], 58);
    assert_eq!(combined.len(), 5);

    let graph = build_graph(&combined).unwrap();
    let config = EngineConfig::default();
    let classification = classify(&graph);

    let mut sizes: Vec<usize> = classification.groups.iter().map(Vec::len).collect();
    sizes.sort();
    assert_eq!(sizes, vec![2, 3]);

    let orderings = sequence(
        &classification.groups,
        &graph,
        &classification.reverse,
        &config,
    );
    for (group, ordering) in classification.groups.iter().zip(&orderings) {
        assert_eq!(ordering.as_ref().unwrap().len(), group.len());
    }

    let chains = build_chains(
        &classification.groups,
        &graph,
        &classification.reverse,
        &config,
    );
    let mut roots: Vec<&str> = chains
        .iter()
        .map(|c| graph.value(c.as_ref().unwrap().index))
        .collect();
    roots.sort();
    assert_eq!(roots, vec!["21+4=25", "30+5=35"]);

    // Each chain's text contains exactly its own problem's equations.
    for tree in chains.iter().map(|c| c.as_ref().unwrap()) {
        let text = render(tree, &graph);
        if graph.value(tree.index) == "30+5=35" {
            assert!(text.contains(": 60/2=30"));
            assert!(text.contains(": 100-40=60"));
            assert!(!text.contains("21"));
        } else {
            assert!(text.contains(": 7*3=21"));
            assert!(!text.contains("60"));
        }
    }
}

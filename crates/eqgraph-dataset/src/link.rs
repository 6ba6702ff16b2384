//! Dependency linking: from equation records to a graph.
//!
//! One node per record, in record order, so node ids coincide with record
//! positions. For every ordered pair `(i, j)` the linker decides whether
//! step `j` consumes step `i`'s result:
//!
//! 1. `i`'s solution is one of `j`'s operands -- link only when it is also
//!    one of `j`'s *main* operands (a primary input of the simplified
//!    expression, not a number buried in a sub-expression).
//! 2. `i` is a single function call whose expression or solution occurs
//!    textually inside `j`'s expression.
//! 3. `j` has sub-expressions and one of their numeric results equals
//!    `i`'s solution.
//!
//! Pairs with identical solutions never link: a redefined number says
//! nothing about which occurrence fed which consumer.

use eqgraph_core::{EquationGraph, NodeId};

use crate::error::DatasetError;
use crate::record::Sample;

/// Weight attached to every discovered dependency edge.
const DEPENDENCY_WEIGHT: f64 = 1.0;

/// Builds the dependency graph of one (possibly combined) sample.
pub fn build_graph(sample: &Sample) -> Result<EquationGraph, DatasetError> {
    let mut graph = EquationGraph::new();
    let ids: Vec<NodeId> = sample
        .records
        .iter()
        .map(|record| graph.add_value(record.full_equation.clone()))
        .collect();

    for i in 0..sample.records.len() {
        for j in 0..sample.records.len() {
            let producer = &sample.records[i];
            let consumer = &sample.records[j];

            if i == j
                || producer.solution == consumer.solution
                || graph.has_dependency(ids[i], ids[j])
            {
                continue;
            }

            if consumer.operands.iter().any(|o| *o == producer.solution) {
                if consumer
                    .main_operands
                    .iter()
                    .any(|o| *o == producer.solution)
                {
                    graph.add_dependency(ids[i], ids[j], DEPENDENCY_WEIGHT)?;
                }
            } else if producer.single_func.is_some() {
                if consumer.expression.contains(&producer.expression)
                    || consumer.expression.contains(&producer.solution)
                {
                    graph.add_dependency(ids[i], ids[j], DEPENDENCY_WEIGHT)?;
                }
            } else if consumer.has_sub_expressions {
                if let Ok(target) = producer.solution.parse::<f64>() {
                    let feeds = consumer
                        .sub_expression_results
                        .iter()
                        .filter_map(|r| r.parse::<f64>().ok())
                        .any(|value| value == target);
                    if feeds {
                        graph.add_dependency(ids[i], ids[j], DEPENDENCY_WEIGHT)?;
                    }
                }
            }
        }
    }

    Ok(graph)
}

//! Sample combination for training batches.
//!
//! Concatenates the records of several samples and shuffles them with a
//! seeded PRNG, so one combined chain can exercise cross-sample linking
//! while staying reproducible: the same seed always yields the same record
//! order.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::record::Sample;

/// Combines samples into one, shuffling record order deterministically.
pub fn combine_samples(samples: &[Sample], seed: u64) -> Sample {
    let mut records: Vec<_> = samples
        .iter()
        .flat_map(|sample| sample.records.iter().cloned())
        .collect();

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    records.shuffle(&mut rng);

    Sample { records }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::EquationRecord;

    fn sample_of(expressions: &[&str]) -> Sample {
        Sample {
            records: expressions
                .iter()
                .map(|e| EquationRecord {
                    expression: e.to_string(),
                    solution: "0".to_string(),
                    full_equation: format!("{}=0", e),
                    simplified_expression: e.to_string(),
                    has_sub_expressions: false,
                    has_function_calls: false,
                    has_special_variables: false,
                    single_func: None,
                    sub_expressions: Vec::new(),
                    sub_expression_results: Vec::new(),
                    operands: Vec::new(),
                    main_operands: Vec::new(),
                    all_numbers: Vec::new(),
                    operators: Vec::new(),
                    main_operator: None,
                })
                .collect(),
        }
    }

    #[test]
    fn combines_all_records() {
        let combined = combine_samples(&[sample_of(&["a", "b"]), sample_of(&["c"])], 7);
        assert_eq!(combined.len(), 3);

        let mut expressions: Vec<&str> = combined
            .records
            .iter()
            .map(|r| r.expression.as_str())
            .collect();
        expressions.sort();
        assert_eq!(expressions, vec!["a", "b", "c"]);
    }

    #[test]
    fn same_seed_same_order() {
        let samples = [sample_of(&["a", "b", "c", "d", "e"]), sample_of(&["f", "g"])];
        let first = combine_samples(&samples, 42);
        let second = combine_samples(&samples, 42);
        assert_eq!(first, second);
    }

    #[test]
    fn empty_input_combines_to_empty() {
        let combined = combine_samples(&[], 0);
        assert!(combined.is_empty());
    }
}

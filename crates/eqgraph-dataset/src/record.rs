//! Processed per-equation metadata.
//!
//! One [`EquationRecord`] describes one step of a worked calculation: the
//! raw expression, its computed solution, and the derived features the
//! dependency linker consumes (operands, sub-expression results, function
//! shape). A [`Sample`] is the ordered list of records for one solution
//! chain.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::DatasetError;

/// Metadata for a single solved equation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquationRecord {
    /// The expression as written, whitespace and underscores scrubbed.
    pub expression: String,
    /// The computed solution, scrubbed of annotations.
    pub solution: String,
    /// `expression=solution`, the display value of the graph node.
    pub full_equation: String,
    /// The expression with evaluable sub-expressions and known constants
    /// reduced to numbers.
    pub simplified_expression: String,
    /// Whether the expression contains compound sub-expressions.
    #[serde(default)]
    pub has_sub_expressions: bool,
    /// Whether the expression uses a named function (e.g. `lcm`, `sqrt`).
    #[serde(default)]
    pub has_function_calls: bool,
    /// Whether the expression uses a special constant (e.g. `pi`).
    #[serde(default)]
    pub has_special_variables: bool,
    /// The function name when the whole expression is one call, e.g.
    /// `sqrt` for `sqrt(3*27)`.
    #[serde(default)]
    pub single_func: Option<String>,
    /// The compound sub-expressions, outermost parentheses stripped.
    #[serde(default)]
    pub sub_expressions: Vec<String>,
    /// One entry per sub-expression: its numeric value when plain
    /// arithmetic, otherwise the sub-expression text unchanged.
    #[serde(default)]
    pub sub_expression_results: Vec<String>,
    /// All numbers appearing in the expression.
    #[serde(default)]
    pub operands: Vec<String>,
    /// The numbers of the simplified expression -- the primary inputs.
    #[serde(default)]
    pub main_operands: Vec<String>,
    /// Operands, mismatched main operands, and the solution together.
    #[serde(default)]
    pub all_numbers: Vec<String>,
    /// Every operator and function name in the expression.
    #[serde(default)]
    pub operators: Vec<String>,
    /// The operator of the simplified expression, or the single function
    /// name; `None` when the expression has neither.
    #[serde(default)]
    pub main_operator: Option<String>,
}

/// One solution chain: the ordered equation records of a worked problem.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub records: Vec<EquationRecord>,
}

impl Sample {
    /// Number of equations in the chain.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the chain has no equations.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Loads processed samples from a JSON file (a top-level array of samples).
pub fn load_samples(path: impl AsRef<Path>) -> Result<Vec<Sample>, DatasetError> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Writes processed samples to a JSON file.
pub fn save_samples(path: impl AsRef<Path>, samples: &[Sample]) -> Result<(), DatasetError> {
    let text = serde_json::to_string_pretty(samples)?;
    fs::write(path, text)?;
    Ok(())
}

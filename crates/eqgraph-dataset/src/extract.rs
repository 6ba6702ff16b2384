//! Extraction of equation records from calculator-annotated solution text.
//!
//! Raw chains interleave `<gadget id="calculator">EXPR</gadget>` calls with
//! `<output>SOLUTION</output>` results. [`ChainExtractor`] pulls the pairs
//! out, scrubs them, and derives the per-equation features the dependency
//! linker consumes: operand lists, primary sub-expressions and their values,
//! single-function shape, and operator inventory.
//!
//! Function names are discovered from the data itself: every alphabetic
//! token seen in an equation that is not a known constant is treated as a
//! function name from then on, so the extractor grows its vocabulary as it
//! processes chains.

use indexmap::IndexSet;
use regex::Regex;

use crate::error::DatasetError;
use crate::eval;
use crate::record::{EquationRecord, Sample};

const CALC_START: &str = r#"<gadget id="calculator">"#;
const CALC_END: &str = "</gadget>";
const OUT_START: &str = "<output>";
const OUT_END: &str = "</output>";

/// Stateful extractor for calculator-annotated chains.
pub struct ChainExtractor {
    special_funcs: IndexSet<String>,
    special_vars: IndexSet<String>,
    calc_re: Regex,
    out_re: Regex,
    expression_scrub_re: Regex,
    solution_scrub_re: Regex,
    token_re: Regex,
    operand_re: Regex,
}

impl ChainExtractor {
    /// Creates an extractor with no predeclared function names.
    pub fn new() -> Result<Self, DatasetError> {
        Self::with_special(IndexSet::new(), IndexSet::new())
    }

    /// Creates an extractor with predeclared function and constant names.
    /// The constant `pi` is always known.
    pub fn with_special(
        special_funcs: IndexSet<String>,
        mut special_vars: IndexSet<String>,
    ) -> Result<Self, DatasetError> {
        special_vars.insert("pi".to_string());

        let calc_re = Regex::new(&format!(
            "{}(.*?){}",
            regex::escape(CALC_START),
            regex::escape(CALC_END)
        ))?;
        let out_re = Regex::new(&format!(
            "{}(.*?){}",
            regex::escape(OUT_START),
            regex::escape(OUT_END)
        ))?;
        let expression_scrub_re = Regex::new(r"\s+|_")?;
        let solution_scrub_re = Regex::new(r"_|around|^.*=\s*| ")?;
        let token_re = Regex::new(r"[a-zA-Z]+")?;

        let mut operand_pattern = String::from(r"-?\d*\.?\d+");
        for var in &special_vars {
            operand_pattern.push('|');
            operand_pattern.push_str(&regex::escape(var));
        }
        let operand_re = Regex::new(&operand_pattern)?;

        Ok(ChainExtractor {
            special_funcs,
            special_vars,
            calc_re,
            out_re,
            expression_scrub_re,
            solution_scrub_re,
            token_re,
            operand_re,
        })
    }

    /// Function names discovered so far.
    pub fn known_functions(&self) -> impl Iterator<Item = &str> {
        self.special_funcs.iter().map(String::as_str)
    }

    /// Processes one raw annotated chain into a [`Sample`].
    pub fn process_chain(&mut self, raw: &str) -> Result<Sample, DatasetError> {
        let pairs = self.extract_formatted(raw);
        self.absorb_function_names(&pairs);

        // Compiled after absorption so newly seen names count as operators.
        let operator_re = self.operator_re()?;

        let mut records = Vec::with_capacity(pairs.len());
        for (expression, solution) in &pairs {
            records.push(self.analyze(expression, solution, &operator_re));
        }
        Ok(Sample { records })
    }

    /// Pulls `(expression, solution)` pairs out of the raw text. Expressions
    /// lose whitespace and underscores; solutions additionally lose
    /// `around` hedges and any leading `... =` prefix.
    fn extract_formatted(&self, raw: &str) -> Vec<(String, String)> {
        let expressions: Vec<String> = self
            .calc_re
            .captures_iter(raw)
            .map(|c| self.expression_scrub_re.replace_all(&c[1], "").into_owned())
            .collect();
        let solutions: Vec<String> = self
            .out_re
            .captures_iter(raw)
            .map(|c| self.solution_scrub_re.replace_all(&c[1], "").into_owned())
            .collect();
        expressions.into_iter().zip(solutions).collect()
    }

    fn absorb_function_names(&mut self, pairs: &[(String, String)]) {
        for (expression, solution) in pairs {
            let full = format!("{}={}", expression, solution);
            for token in self.token_re.find_iter(&full) {
                let token = token.as_str();
                if !self.special_vars.contains(token) {
                    self.special_funcs.insert(token.to_string());
                }
            }
        }
    }

    fn operator_re(&self) -> Result<Regex, DatasetError> {
        let mut pattern = String::new();
        for func in &self.special_funcs {
            pattern.push_str(&regex::escape(func));
            pattern.push('|');
        }
        pattern.push_str(r"\*\*|[-+/*%]");
        Ok(Regex::new(&pattern)?)
    }

    fn analyze(&self, expression: &str, solution: &str, operator_re: &Regex) -> EquationRecord {
        let single_func = self.single_function(expression);

        let mut temp = match &single_func {
            // Strip `name(` and the closing `)` to analyze the argument.
            Some(name) => expression[name.len() + 1..expression.len() - 1].to_string(),
            None => expression.to_string(),
        };

        let mut has_function_calls = single_func.is_some();
        for func in &self.special_funcs {
            if temp.contains(func.as_str()) {
                has_function_calls = true;
            }
        }
        let has_special_variables = self
            .special_vars
            .iter()
            .any(|var| temp.contains(var.as_str()));

        let sub_expressions = primary_subexpressions(&temp);
        let has_sub_expressions = !sub_expressions.is_empty();

        let mut sub_expression_results = Vec::with_capacity(sub_expressions.len());
        for sub in &sub_expressions {
            match eval::evaluate(sub) {
                Ok(value) => {
                    let formatted = format_number(value);
                    if !eval::is_plain_number(sub) {
                        temp = temp.replace(sub.as_str(), &formatted);
                    }
                    sub_expression_results.push(formatted);
                }
                // Not plain arithmetic; keep the text so downstream
                // consumers can see what was there.
                Err(_) => sub_expression_results.push(sub.clone()),
            }
        }

        let simplified_expression = match &single_func {
            Some(name) => format!("{}({})", name, temp),
            None => {
                let mut simplified = temp;
                for var in &self.special_vars {
                    if let Some(value) = constant_value(var) {
                        if simplified.contains(var.as_str()) {
                            simplified = simplified.replace(var.as_str(), &format_number(value));
                        }
                    }
                }
                simplified
            }
        };

        let operands: Vec<String> = self
            .operand_re
            .find_iter(expression)
            .map(|m| m.as_str().to_string())
            .collect();
        let main_operands: Vec<String> = self
            .operand_re
            .find_iter(&simplified_expression)
            .map(|m| m.as_str().to_string())
            .collect();

        let mut all_numbers = operands.clone();
        if operands != main_operands {
            for j in 0..operands.len() {
                if j < main_operands.len() && operands[j] != main_operands[j] {
                    all_numbers.push(main_operands[j].clone());
                }
            }
        }
        all_numbers.push(solution.to_string());

        let operators: Vec<String> = operator_re
            .find_iter(expression)
            .map(|m| m.as_str().to_string())
            .collect();
        let main_operator = match &single_func {
            Some(name) => Some(name.clone()),
            None => operator_re
                .find_iter(&simplified_expression)
                .next()
                .map(|m| m.as_str().to_string()),
        };

        EquationRecord {
            expression: expression.to_string(),
            solution: solution.to_string(),
            full_equation: format!("{}={}", expression, solution),
            simplified_expression,
            has_sub_expressions,
            has_function_calls,
            has_special_variables,
            single_func,
            sub_expressions,
            sub_expression_results,
            operands,
            main_operands,
            all_numbers,
            operators,
            main_operator,
        }
    }

    /// Detects the `name(...)` shape spanning the whole expression, for a
    /// known function name.
    fn single_function(&self, expression: &str) -> Option<String> {
        let name_end = expression.find(|c: char| !c.is_ascii_alphabetic())?;
        if name_end == 0 {
            return None;
        }
        let (name, rest) = expression.split_at(name_end);
        if !self.special_funcs.contains(name) {
            return None;
        }
        if spans_balanced_parens(rest) {
            Some(name.to_string())
        } else {
            None
        }
    }
}

/// Returns `true` when `text` is `( ... )` with the opening parenthesis
/// matched only by the final character.
fn spans_balanced_parens(text: &str) -> bool {
    if text.len() < 2 || !text.starts_with('(') || !text.ends_with(')') {
        return false;
    }
    let mut depth = 0i32;
    for (i, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 && i != text.len() - 1 {
                    return false;
                }
            }
            _ => {}
        }
        if depth < 0 {
            return false;
        }
    }
    depth == 0
}

/// The primary sub-expressions of one expression: for a call, its arguments;
/// for a binary expression, each compound side (or the arguments of a side
/// that is itself a call).
fn primary_subexpressions(expression: &str) -> Vec<String> {
    if let Some(args) = call_arguments(expression) {
        return args;
    }
    if let Some((left, right)) = split_root_binop(expression) {
        let mut subs = operand_subexpressions(left);
        subs.extend(operand_subexpressions(right));
        return subs;
    }
    Vec::new()
}

/// For `name(a, b, ...)` spanning the whole text, the argument list.
fn call_arguments(expression: &str) -> Option<Vec<String>> {
    let name_end = expression.find(|c: char| !c.is_ascii_alphabetic())?;
    if name_end == 0 {
        return None;
    }
    let rest = &expression[name_end..];
    if !spans_balanced_parens(rest) {
        return None;
    }
    let inner = &rest[1..rest.len() - 1];
    if inner.is_empty() {
        return Some(Vec::new());
    }
    Some(split_top_level_commas(inner))
}

fn split_top_level_commas(text: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    for (i, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            ',' if depth == 0 => {
                parts.push(text[start..i].to_string());
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(text[start..].to_string());
    parts
}

/// Splits at the root binary operator: the rightmost top-level `+`/`-`,
/// else the rightmost top-level `*`/`/`/`%`, else the leftmost `**`.
/// Returns `None` for atoms, unary expressions, and calls.
fn split_root_binop(expression: &str) -> Option<(&str, &str)> {
    let bytes = expression.as_bytes();
    let mut depth = 0i32;
    let mut add_pos: Option<(usize, usize)> = None;
    let mut mul_pos: Option<(usize, usize)> = None;
    let mut pow_pos: Option<(usize, usize)> = None;

    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'(' => depth += 1,
            b')' => depth -= 1,
            b'+' | b'-' if depth == 0 => {
                if is_binary_position(bytes, i) {
                    add_pos = Some((i, 1));
                }
            }
            b'*' if depth == 0 => {
                if bytes.get(i + 1) == Some(&b'*') {
                    if pow_pos.is_none() && is_binary_position(bytes, i) {
                        pow_pos = Some((i, 2));
                    }
                    i += 2;
                    continue;
                }
                if is_binary_position(bytes, i) {
                    mul_pos = Some((i, 1));
                }
            }
            b'/' | b'%' if depth == 0 => {
                if is_binary_position(bytes, i) {
                    mul_pos = Some((i, 1));
                }
            }
            _ => {}
        }
        i += 1;
    }

    let (pos, len) = add_pos.or(mul_pos).or(pow_pos)?;
    Some((&expression[..pos], &expression[pos + len..]))
}

/// An operator is binary when something other than another operator or an
/// opening parenthesis precedes it.
fn is_binary_position(bytes: &[u8], i: usize) -> bool {
    if i == 0 {
        return false;
    }
    !matches!(bytes[i - 1], b'+' | b'-' | b'*' | b'/' | b'%' | b'(')
}

/// What one side of the root operator contributes: a call side contributes
/// its arguments; a compound side contributes itself (outer parentheses
/// stripped); an atom contributes nothing.
fn operand_subexpressions(side: &str) -> Vec<String> {
    let side = strip_outer_parens(side);
    if let Some(args) = call_arguments(side) {
        return args;
    }
    if side.starts_with('-') || split_root_binop(side).is_some() {
        return vec![side.to_string()];
    }
    Vec::new()
}

fn strip_outer_parens(mut text: &str) -> &str {
    while spans_balanced_parens(text) {
        text = &text[1..text.len() - 1];
    }
    text
}

fn constant_value(name: &str) -> Option<f64> {
    match name {
        "pi" => Some(std::f64::consts::PI),
        _ => None,
    }
}

fn format_number(value: f64) -> String {
    format!("{}", value)
}

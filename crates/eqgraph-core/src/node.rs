//! Node payload for the equation dependency graph.
//!
//! [`EquationNode`] carries the display value of one computation step -- the
//! formatted `expression=solution` string in the dataset pipeline. The payload
//! is opaque to every graph algorithm: grouping, sequencing, and chain
//! building look only at edges, and the renderer prints the value verbatim.

use serde::{Deserialize, Serialize};

/// A node in the equation dependency graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquationNode {
    /// Display value of this step. Ignored by all graph algorithms.
    pub value: String,
}

impl EquationNode {
    /// Creates a node with the given display value.
    pub fn new(value: impl Into<String>) -> Self {
        EquationNode {
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_takes_str_and_string() {
        let a = EquationNode::new("2+3=5");
        let b = EquationNode::new(String::from("2+3=5"));
        assert_eq!(a, b);
        assert_eq!(a.value, "2+3=5");
    }

    #[test]
    fn serde_roundtrip() {
        let node = EquationNode::new("10*4=40");
        let json = serde_json::to_string(&node).unwrap();
        let back: EquationNode = serde_json::from_str(&json).unwrap();
        assert_eq!(node, back);
    }
}

//! Data model for equation dependency graphs.
//!
//! A graph's nodes are computation steps (one solved equation each) and its
//! directed edges say "this step's result feeds that step". The crate owns
//! the container and the read-only contract; the analysis algorithms live in
//! `eqgraph-engine` and consume graphs through [`GraphView`].

pub mod error;
pub mod graph;
pub mod id;
pub mod node;
pub mod view;

// Re-export commonly used types
pub use error::CoreError;
pub use graph::EquationGraph;
pub use id::{EdgeId, NodeId};
pub use node::EquationNode;
pub use view::{GraphView, SuccessorList};

//! Dataset side of the equation dependency pipeline.
//!
//! Turns calculator-annotated solution chains into [`EquationRecord`]
//! metadata and links the records into an
//! [`EquationGraph`](eqgraph_core::EquationGraph) ready for analysis:
//!
//! - [`ChainExtractor`]: raw annotated text to per-equation records.
//! - [`eval`]: plain-arithmetic evaluation used to reduce sub-expressions.
//! - [`build_graph`]: the dependency-linking policy over a sample's records.
//! - [`combine_samples`]: seeded concatenate-and-shuffle of several samples.
//!
//! Dataset acquisition is out of scope: callers bring their own files and
//! load them with [`load_samples`].

pub mod combine;
pub mod error;
pub mod eval;
pub mod extract;
pub mod link;
pub mod record;

pub use combine::combine_samples;
pub use error::DatasetError;
pub use extract::ChainExtractor;
pub use link::build_graph;
pub use record::{load_samples, save_samples, EquationRecord, Sample};

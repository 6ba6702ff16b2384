//! Analysis engine for equation dependency graphs.
//!
//! Three algorithms share one shape of input -- a read-only
//! [`GraphView`](eqgraph_core::GraphView) plus the reverse-adjacency index --
//! and run independently of each other:
//!
//! - [`classify`]: partition the graph into weakly-connected groups and
//!   build the predecessor index (runs first, feeds the other two).
//! - [`sequence`]: per group, a Kahn's-algorithm topological ordering.
//! - [`build_chains`]: per group, the ancestor tree rooted at the group's
//!   terminal step.
//!
//! [`render`] turns a chain tree into the tab-indented text dump.
//!
//! # Degenerate groups
//!
//! A cyclic group cannot be fully sequenced and a sinkless group has no
//! chain root. [`EngineConfig`] picks between the historical permissive
//! behavior (truncated orderings, global-node-0 chain roots) and explicit
//! [`EngineError`] reports. Either way an affected group never aborts the
//! processing of its siblings.

pub mod chain;
pub mod classify;
pub mod error;
pub mod render;
pub mod sequence;

pub use chain::{build_chains, ChainTree};
pub use classify::{classify, Classification, ReverseAdjacency};
pub use error::EngineError;
pub use render::render;
pub use sequence::sequence;

use serde::{Deserialize, Serialize};

/// Behavior switches for the degenerate-group cases.
///
/// The defaults fail loudly: cyclic ancestries and sinkless groups surface
/// as [`EngineError`] values. The two flags restore the historical
/// permissive behaviors where callers need output parity with existing
/// pipelines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Report [`EngineError::CycleDetected`] when a group's queue drains
    /// before covering the group, instead of returning the silently
    /// truncated ordering.
    pub strict: bool,

    /// Root a sinkless group's chain at global node 0, reproducing the
    /// historical substitute root. The substituted node usually belongs to
    /// a different group entirely; keep this off unless byte-for-byte
    /// parity with old output matters.
    pub legacy_terminal_fallback: bool,
}

//! Sub-tour elimination by row generation.
//!
//! - [`SeparationOracle`]: turns a candidate arc selection into violated cuts
//! - [`CutPool`]: append-only, mutex-guarded store shared across callbacks
//! - [`components`]: iterative union-find partition of the selected arcs

mod components;
mod oracle;
mod pool;

pub use components::{components, UnionFind};
pub use oracle::{Cut, CutPolicy, SeparationConfig, SeparationOracle};
pub use pool::CutPool;

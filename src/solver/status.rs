//! Driver-level termination status.

use serde::Serialize;

/// Raw status reported by a [`SolverDriver`](super::SolverDriver).
///
/// The session maps it, together with the incumbent and gap, to a
/// [`SolveStatus`](crate::models::SolveStatus).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DriverStatus {
    Optimal,
    Infeasible,
    Unbounded,
    ReachedTimeLimit,
    /// Node, iteration or row-generation round limit.
    ReachedIterationLimit,
    Unknown,
}

impl DriverStatus {
    /// Returns `true` if a limit stopped the search.
    pub fn is_limit(self) -> bool {
        matches!(
            self,
            DriverStatus::ReachedTimeLimit | DriverStatus::ReachedIterationLimit
        )
    }
}

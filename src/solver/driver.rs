//! Seam between the session and a MIP solver backend.

use super::{DriverStatus, SolverConfig};
use crate::error::VrptwError;
use crate::formulation::{Formulation, LinearConstraint};

/// Called by a driver with each candidate solution it considers accepting.
///
/// Returns the inequalities the candidate violates; an empty vector means
/// the candidate is acceptable. Implementations may be invoked from several
/// threads.
pub trait LazyConstraintCallback: Send + Sync {
    fn separate(&self, values: &[f64]) -> Vec<LinearConstraint>;
}

/// What a driver hands back after search.
#[derive(Debug, Clone, PartialEq)]
pub struct DriverOutcome {
    pub status: DriverStatus,
    /// Accepted solution, indexed by column. `None` if no candidate survived
    /// the callback.
    pub values: Option<Vec<f64>>,
    pub objective_value: Option<f64>,
    /// Relative gap of the accepted solution, when known.
    pub mip_gap: Option<f64>,
    /// Relaxation solves performed.
    pub rounds: usize,
}

impl DriverOutcome {
    /// An outcome without an accepted solution.
    pub fn without_solution(status: DriverStatus, rounds: usize) -> Self {
        Self {
            status,
            values: None,
            objective_value: None,
            mip_gap: None,
            rounds,
        }
    }
}

/// A MIP backend that owns search and consults a lazy-constraint callback.
pub trait SolverDriver {
    /// Backend name for logs.
    fn name(&self) -> &str;

    /// Optimises `formulation`, consulting `callback` before accepting any
    /// candidate, within the limits of `config`.
    fn solve(
        &mut self,
        formulation: &Formulation,
        callback: &dyn LazyConstraintCallback,
        config: &SolverConfig,
    ) -> Result<DriverOutcome, VrptwError>;
}

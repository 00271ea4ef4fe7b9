//! Solve status and result record.

use serde::Serialize;

use super::Route;

/// Outcome class of a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SolveStatus {
    /// Proven optimal within the optimality tolerance.
    Optimal,
    /// A time, gap or round limit stopped the search; the best feasible
    /// solution found is returned without an optimality proof.
    FeasibleWithinBudget,
    /// No integer-feasible routing exists.
    Infeasible,
    /// No feasible solution was found within the budget.
    Unknown,
}

impl SolveStatus {
    /// Returns `true` if the status carries routes and an objective value.
    pub fn has_solution(self) -> bool {
        matches!(self, SolveStatus::Optimal | SolveStatus::FeasibleWithinBudget)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SolveStatus::Optimal => "optimal",
            SolveStatus::FeasibleWithinBudget => "feasible_within_budget",
            SolveStatus::Infeasible => "infeasible",
            SolveStatus::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result record handed to the reporting layer.
///
/// `objective_value` and `routes` are only populated when
/// [`SolveStatus::has_solution`] holds.
///
/// # Examples
///
/// ```
/// use u_vrptw::models::{SolveResult, SolveStatus};
///
/// let result = SolveResult::without_solution(SolveStatus::Infeasible);
/// assert!(result.objective_value.is_none());
/// assert!(result.routes.is_empty());
/// assert_eq!(result.vehicle_count, 0);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct SolveResult {
    pub status: SolveStatus,
    pub objective_value: Option<f64>,
    pub routes: Vec<Route>,
    pub vehicle_count: usize,
    /// Sub-tour elimination cuts appended during the solve.
    pub cuts_added: usize,
    /// Driver rounds (relaxation re-solves) performed.
    pub rounds: usize,
    pub elapsed_seconds: f64,
}

impl SolveResult {
    /// A result with routes; `vehicle_count` follows the route count.
    pub fn with_routes(status: SolveStatus, objective_value: f64, routes: Vec<Route>) -> Self {
        let vehicle_count = routes.len();
        Self {
            status,
            objective_value: Some(objective_value),
            routes,
            vehicle_count,
            cuts_added: 0,
            rounds: 0,
            elapsed_seconds: 0.0,
        }
    }

    /// A result carrying neither routes nor an objective value.
    pub fn without_solution(status: SolveStatus) -> Self {
        Self {
            status,
            objective_value: None,
            routes: Vec::new(),
            vehicle_count: 0,
            cuts_added: 0,
            rounds: 0,
            elapsed_seconds: 0.0,
        }
    }

    /// Total distance recomputed from the routes.
    pub fn total_distance(&self) -> f64 {
        self.routes.iter().map(Route::distance).sum()
    }

    /// Number of customers served across all routes.
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(Route::len).sum()
    }
}

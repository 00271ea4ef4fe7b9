//! One solve of one instance: formulation, cut pool, driver, decoding.

use std::time::Instant;

use tracing::{info, warn};

use super::{DriverOutcome, DriverStatus, LazyConstraintCallback, SolverConfig, SolverDriver};
use crate::decode::RouteDecoder;
use crate::error::VrptwError;
use crate::evaluation::RouteEvaluator;
use crate::formulation::{Formulation, FormulationBuilder, LinearConstraint};
use crate::models::{Instance, SolveResult, SolveStatus};
use crate::separation::{CutPool, SeparationOracle};

/// Lazy-constraint callback backed by the separation oracle and the
/// session's cut pool.
struct SubtourCallback<'a> {
    oracle: SeparationOracle<'a>,
    pool: &'a CutPool,
}

impl LazyConstraintCallback for SubtourCallback<'_> {
    fn separate(&self, values: &[f64]) -> Vec<LinearConstraint> {
        self.oracle.separate_into(values, self.pool)
    }
}

/// Owns everything a single solve mutates.
///
/// The cut pool lives here rather than in the driver or the oracle, and
/// only grows while [`solve`](Self::solve) runs.
///
/// # Examples
///
/// ```no_run
/// use u_vrptw::models::{Instance, Node, TimeWindow};
/// use u_vrptw::solver::{HighsDriver, SolveSession, SolverConfig};
///
/// let tw = TimeWindow::new(0.0, 100.0).unwrap();
/// let instance = Instance::new(
///     vec![Node::depot(0.0, 0.0, tw), Node::new(1, 1.0, 0.0, 1.0, tw, 0.0)],
///     10.0,
/// )
/// .unwrap();
///
/// let session = SolveSession::new(&instance, SolverConfig::default()).unwrap();
/// let result = session.solve(&mut HighsDriver::new()).unwrap();
/// println!("{} {:?}", result.status, result.objective_value);
/// ```
pub struct SolveSession<'a> {
    instance: &'a Instance,
    config: SolverConfig,
    formulation: Formulation,
    pool: CutPool,
}

impl<'a> SolveSession<'a> {
    /// Validates `config` and builds the formulation with derived big-M values.
    pub fn new(instance: &'a Instance, config: SolverConfig) -> Result<Self, VrptwError> {
        let formulation = FormulationBuilder::new(instance).build();
        Self::with_formulation(instance, config, formulation)
    }

    /// Uses a prebuilt formulation, e.g. one with overridden big-M values.
    pub fn with_formulation(
        instance: &'a Instance,
        config: SolverConfig,
        formulation: Formulation,
    ) -> Result<Self, VrptwError> {
        config.validate()?;
        if formulation.layout().num_nodes() != instance.num_nodes() {
            return Err(VrptwError::InvalidConfig(format!(
                "formulation covers {} nodes, instance has {}",
                formulation.layout().num_nodes(),
                instance.num_nodes()
            )));
        }
        Ok(Self {
            instance,
            config,
            formulation,
            pool: CutPool::new(),
        })
    }

    pub fn formulation(&self) -> &Formulation {
        &self.formulation
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Cuts appended so far.
    pub fn pool(&self) -> &CutPool {
        &self.pool
    }

    /// Runs `driver` to termination and turns its outcome into a result.
    ///
    /// Proven infeasibility and exhausted budgets are statuses, not errors.
    /// An accepted solution that does not decode into routes is returned as
    /// [`VrptwError::DecoderInvariantViolation`].
    pub fn solve(&self, driver: &mut dyn SolverDriver) -> Result<SolveResult, VrptwError> {
        let started = Instant::now();
        let instance = self.instance;
        info!(
            component = "session",
            operation = "solve",
            instance = instance.name(),
            solver = driver.name(),
            customers = instance.num_customers() as u64,
            variables = self.formulation.num_variables() as u64,
            constraints = self.formulation.num_constraints() as u64,
            "Starting branch-and-cut solve"
        );

        if let Some(node) = (1..instance.num_nodes())
            .find(|&i| instance.node(i).demand() > instance.capacity())
        {
            warn!(
                component = "session",
                operation = "solve",
                node = node as u64,
                demand = instance.node(node).demand(),
                capacity = instance.capacity(),
                "Customer demand exceeds vehicle capacity"
            );
            let mut result = SolveResult::without_solution(SolveStatus::Infeasible);
            result.elapsed_seconds = started.elapsed().as_secs_f64();
            return Ok(result);
        }

        let callback = SubtourCallback {
            oracle: SeparationOracle::new(self.formulation.layout(), self.config.separation),
            pool: &self.pool,
        };
        let outcome = driver.solve(&self.formulation, &callback, &self.config)?;
        let status = classify(&outcome, self.config.optimality_tolerance);

        let mut result = match (&outcome.values, status.has_solution()) {
            (Some(values), true) => {
                let decoder = RouteDecoder::new(
                    instance,
                    self.formulation.layout(),
                    self.config.separation.threshold,
                );
                let routes = decoder.decode(values)?;
                for violation in RouteEvaluator::new(instance).evaluate(&routes) {
                    warn!(
                        component = "session",
                        operation = "evaluate",
                        %violation,
                        "Accepted solution fails independent check"
                    );
                }
                let objective = outcome
                    .objective_value
                    .unwrap_or_else(|| self.formulation.objective_value(values));
                SolveResult::with_routes(status, objective, routes)
            }
            _ => SolveResult::without_solution(status),
        };
        result.cuts_added = self.pool.len();
        result.rounds = outcome.rounds;
        result.elapsed_seconds = started.elapsed().as_secs_f64();

        info!(
            component = "session",
            operation = "solve",
            instance = instance.name(),
            status = %result.status,
            objective_value = result.objective_value.unwrap_or(f64::NAN),
            vehicles = result.vehicle_count as u64,
            cuts = result.cuts_added as u64,
            rounds = result.rounds as u64,
            duration_s = result.elapsed_seconds,
            "Solve finished"
        );
        Ok(result)
    }
}

/// Maps a driver outcome to the reported status.
fn classify(outcome: &DriverOutcome, optimality_tolerance: f64) -> SolveStatus {
    match (outcome.status, outcome.values.is_some()) {
        (DriverStatus::Infeasible, _) => SolveStatus::Infeasible,
        (DriverStatus::Optimal, true) => {
            let gap = outcome.mip_gap.unwrap_or(0.0);
            if gap <= optimality_tolerance {
                SolveStatus::Optimal
            } else {
                SolveStatus::FeasibleWithinBudget
            }
        }
        (status, true) if status.is_limit() => SolveStatus::FeasibleWithinBudget,
        _ => SolveStatus::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formulation::VarLayout;
    use crate::models::{Node, TimeWindow};

    /// Offers pre-set candidates in order until the callback accepts one.
    struct ScriptedDriver {
        candidates: Vec<Vec<(usize, usize)>>,
        final_status: DriverStatus,
        consult_callback: bool,
    }

    impl ScriptedDriver {
        fn new(candidates: Vec<Vec<(usize, usize)>>) -> Self {
            Self {
                candidates,
                final_status: DriverStatus::Optimal,
                consult_callback: true,
            }
        }
    }

    fn values_for(layout: &VarLayout, arcs: &[(usize, usize)]) -> Vec<f64> {
        let mut values = vec![0.0; layout.num_variables()];
        for &(i, j) in arcs {
            values[layout.arc(i, j).expect("arc").index()] = 1.0;
        }
        values
    }

    impl SolverDriver for ScriptedDriver {
        fn name(&self) -> &str {
            "scripted"
        }

        fn solve(
            &mut self,
            formulation: &Formulation,
            callback: &dyn LazyConstraintCallback,
            _config: &SolverConfig,
        ) -> Result<DriverOutcome, VrptwError> {
            let mut rounds = 0;
            for arcs in &self.candidates {
                rounds += 1;
                let values = values_for(formulation.layout(), arcs);
                if self.consult_callback && !callback.separate(&values).is_empty() {
                    continue;
                }
                return Ok(DriverOutcome {
                    status: self.final_status,
                    objective_value: Some(formulation.objective_value(&values)),
                    mip_gap: Some(0.0),
                    values: Some(values),
                    rounds,
                });
            }
            Ok(DriverOutcome::without_solution(DriverStatus::Unknown, rounds))
        }
    }

    fn square() -> Instance {
        let tw = TimeWindow::new(0.0, 100.0).expect("valid");
        Instance::new(
            vec![
                Node::depot(0.0, 0.0, tw),
                Node::new(1, 1.0, 0.0, 1.0, tw, 0.0),
                Node::new(2, 1.0, 1.0, 1.0, tw, 0.0),
                Node::new(3, 0.0, 1.0, 1.0, tw, 0.0),
            ],
            10.0,
        )
        .expect("valid")
    }

    #[test]
    fn test_subtour_candidate_rejected_then_route_accepted() {
        let inst = square();
        let session = SolveSession::new(&inst, SolverConfig::default()).expect("session");
        let mut driver = ScriptedDriver::new(vec![
            vec![(0, 1), (1, 0), (2, 3), (3, 2)],
            vec![(0, 1), (1, 2), (2, 3), (3, 0)],
        ]);
        let result = session.solve(&mut driver).expect("solve");
        assert_eq!(result.status, SolveStatus::Optimal);
        assert_eq!(result.cuts_added, 1);
        assert_eq!(result.rounds, 2);
        assert_eq!(result.routes.len(), 1);
        assert_eq!(result.routes[0].node_ids(), vec![0, 1, 2, 3, 0]);
        assert!((result.objective_value.expect("objective") - 4.0).abs() < 1e-9);
        assert_eq!(session.pool().snapshot()[0].members(), &[2, 3]);
    }

    #[test]
    fn test_repeated_subtour_candidate_rejected() {
        let inst = square();
        let session = SolveSession::new(&inst, SolverConfig::default()).expect("session");
        let subtour = vec![(0, 1), (1, 0), (2, 3), (3, 2)];
        let mut driver = ScriptedDriver::new(vec![
            subtour.clone(),
            subtour,
            vec![(0, 1), (1, 2), (2, 3), (3, 0)],
        ]);
        let result = session.solve(&mut driver).expect("solve");
        assert_eq!(result.status, SolveStatus::Optimal);
        assert_eq!(result.rounds, 3);
        assert_eq!(result.cuts_added, 1);
        assert_eq!(result.routes[0].node_ids(), vec![0, 1, 2, 3, 0]);
    }

    #[test]
    fn test_no_candidate_is_unknown() {
        let inst = square();
        let session = SolveSession::new(&inst, SolverConfig::default()).expect("session");
        let mut driver = ScriptedDriver::new(vec![vec![(1, 2), (2, 3), (3, 1)]]);
        let result = session.solve(&mut driver).expect("solve");
        assert_eq!(result.status, SolveStatus::Unknown);
        assert!(result.routes.is_empty());
        assert!(result.objective_value.is_none());
    }

    #[test]
    fn test_limit_with_incumbent_is_feasible_within_budget() {
        let inst = square();
        let session = SolveSession::new(&inst, SolverConfig::default()).expect("session");
        let mut driver = ScriptedDriver::new(vec![vec![(0, 1), (1, 0), (0, 2), (2, 3), (3, 0)]]);
        driver.final_status = DriverStatus::ReachedTimeLimit;
        let result = session.solve(&mut driver).expect("solve");
        assert_eq!(result.status, SolveStatus::FeasibleWithinBudget);
        assert_eq!(result.vehicle_count, 2);
        assert_eq!(result.num_served(), 3);
    }

    #[test]
    fn test_unchecked_subtour_is_decoder_error() {
        let inst = square();
        let session = SolveSession::new(&inst, SolverConfig::default()).expect("session");
        let mut driver = ScriptedDriver::new(vec![vec![(0, 1), (1, 0), (2, 3), (3, 2)]]);
        driver.consult_callback = false;
        let err = session.solve(&mut driver).expect_err("decoder");
        assert_eq!(err.code(), "DECODER_INVARIANT");
    }

    #[test]
    fn test_oversized_demand_is_infeasible_without_driver() {
        let tw = TimeWindow::new(0.0, 100.0).expect("valid");
        let inst = Instance::new(
            vec![Node::depot(0.0, 0.0, tw), Node::new(1, 1.0, 0.0, 11.0, tw, 0.0)],
            10.0,
        )
        .expect("valid");
        let session = SolveSession::new(&inst, SolverConfig::default()).expect("session");
        let mut driver = ScriptedDriver::new(Vec::new());
        let result = session.solve(&mut driver).expect("solve");
        assert_eq!(result.status, SolveStatus::Infeasible);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let inst = square();
        let config = SolverConfig::new().with_max_rounds(0);
        assert!(SolveSession::new(&inst, config).is_err());
    }

    #[test]
    fn test_classify() {
        let with = |status, gap| DriverOutcome {
            status,
            values: Some(vec![0.0]),
            objective_value: Some(1.0),
            mip_gap: gap,
            rounds: 1,
        };
        assert_eq!(classify(&with(DriverStatus::Optimal, Some(0.0)), 1e-4), SolveStatus::Optimal);
        assert_eq!(
            classify(&with(DriverStatus::Optimal, Some(0.05)), 1e-4),
            SolveStatus::FeasibleWithinBudget
        );
        assert_eq!(
            classify(&with(DriverStatus::ReachedIterationLimit, None), 1e-4),
            SolveStatus::FeasibleWithinBudget
        );
        assert_eq!(
            classify(&DriverOutcome::without_solution(DriverStatus::Infeasible, 1), 1e-4),
            SolveStatus::Infeasible
        );
        assert_eq!(
            classify(&DriverOutcome::without_solution(DriverStatus::ReachedTimeLimit, 3), 1e-4),
            SolveStatus::Unknown
        );
        assert_eq!(classify(&with(DriverStatus::Unbounded, None), 1e-4), SolveStatus::Unknown);
    }
}

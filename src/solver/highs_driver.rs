//! Row-generation driver on top of HiGHS.

use std::time::Instant;

use highs::{Col, HighsModelStatus, RowProblem, Sense};
use tracing::{debug, info};

use super::{DriverOutcome, DriverStatus, LazyConstraintCallback, SolverConfig, SolverDriver};
use crate::error::VrptwError;
use crate::formulation::{Formulation, LinearConstraint};

/// Solves the formulation with HiGHS and adds sub-tour cuts between solves.
///
/// Each round rebuilds the row problem from the base constraints plus every
/// cut returned so far, solves it to integer optimality (or the remaining
/// time budget), and passes the incumbent to the callback. The loop ends
/// when the callback returns no rows. An incumbent produced under a limit
/// that still needs cuts is not accepted.
#[derive(Debug, Default)]
pub struct HighsDriver {
    cuts: Vec<LinearConstraint>,
}

impl HighsDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cuts added by the most recent solve, in round order.
    pub fn cuts(&self) -> &[LinearConstraint] {
        &self.cuts
    }

    fn build_problem(&self, formulation: &Formulation) -> RowProblem {
        let mut costs = vec![0.0; formulation.num_variables()];
        for &(var, coef) in formulation.objective().terms() {
            costs[var.index()] += coef;
        }

        let mut problem = RowProblem::default();
        let cols: Vec<Col> = formulation
            .variables()
            .iter()
            .zip(costs)
            .map(|(var, cost)| {
                if var.is_integer() {
                    problem.add_integer_column(cost, var.lower..=var.upper)
                } else {
                    problem.add_column(cost, var.lower..=var.upper)
                }
            })
            .collect();

        for row in formulation.constraints().iter().chain(&self.cuts) {
            let (lower, upper) = row.bounds();
            let factors: Vec<(Col, f64)> = row
                .expr()
                .terms()
                .iter()
                .map(|&(var, coef)| (cols[var.index()], coef))
                .collect();
            problem.add_row(lower..=upper, factors);
        }
        problem
    }
}

impl SolverDriver for HighsDriver {
    fn name(&self) -> &str {
        "highs"
    }

    fn solve(
        &mut self,
        formulation: &Formulation,
        callback: &dyn LazyConstraintCallback,
        config: &SolverConfig,
    ) -> Result<DriverOutcome, VrptwError> {
        self.cuts.clear();
        let started = Instant::now();
        let mut rounds = 0;

        loop {
            if rounds >= config.max_rounds {
                info!(
                    component = "solver",
                    operation = "solve",
                    solver = "highs",
                    rounds = rounds as u64,
                    "Row-generation round limit reached"
                );
                return Ok(DriverOutcome::without_solution(
                    DriverStatus::ReachedIterationLimit,
                    rounds,
                ));
            }
            let remaining = match config.time_limit {
                Some(limit) => {
                    let left = limit - started.elapsed().as_secs_f64();
                    if left <= 0.0 {
                        return Ok(DriverOutcome::without_solution(
                            DriverStatus::ReachedTimeLimit,
                            rounds,
                        ));
                    }
                    Some(left)
                }
                None => None,
            };
            rounds += 1;

            let mut model = self.build_problem(formulation).optimise(Sense::Minimise);
            if config.verbose {
                model.set_option("output_flag", true);
            } else {
                model.make_quiet();
            }
            if let Some(left) = remaining {
                model.set_option("time_limit", left);
            }
            if let Some(gap) = config.mip_gap {
                model.set_option("mip_rel_gap", gap);
            }
            if let Some(threads) = config.threads {
                model.set_option("threads", threads as i32);
            }

            let solved = model.solve();
            let status = map_status(solved.status());
            let gap = solved.mip_gap();
            let has_incumbent =
                status == DriverStatus::Optimal || (status.is_limit() && gap.is_finite());

            debug!(
                component = "solver",
                operation = "round",
                solver = "highs",
                round = rounds as u64,
                solver_status = ?status,
                rows = (formulation.num_constraints() + self.cuts.len()) as u64,
                objective_value = if has_incumbent { solved.objective_value() } else { f64::NAN },
                optimality_gap = gap,
                "HiGHS round completed"
            );

            if !has_incumbent {
                return Ok(DriverOutcome::without_solution(status, rounds));
            }
            let values = solved.get_solution().columns().to_vec();
            if values.len() != formulation.num_variables() {
                return Err(VrptwError::Solver(format!(
                    "HiGHS returned {} column values for {} variables",
                    values.len(),
                    formulation.num_variables()
                )));
            }

            let violated = callback.separate(&values);
            if violated.is_empty() {
                return Ok(DriverOutcome {
                    status,
                    objective_value: Some(solved.objective_value()),
                    mip_gap: Some(gap),
                    values: Some(values),
                    rounds,
                });
            }
            if status != DriverStatus::Optimal {
                // A limit stopped this round and the incumbent has sub-tours.
                return Ok(DriverOutcome::without_solution(status, rounds));
            }
            for cut in violated {
                if !self.cuts.contains(&cut) {
                    self.cuts.push(cut);
                }
            }
        }
    }
}

fn map_status(status: HighsModelStatus) -> DriverStatus {
    match status {
        HighsModelStatus::Optimal => DriverStatus::Optimal,
        HighsModelStatus::Infeasible => DriverStatus::Infeasible,
        HighsModelStatus::Unbounded | HighsModelStatus::UnboundedOrInfeasible => {
            DriverStatus::Unbounded
        }
        HighsModelStatus::ReachedTimeLimit => DriverStatus::ReachedTimeLimit,
        HighsModelStatus::ReachedIterationLimit => DriverStatus::ReachedIterationLimit,
        _ => DriverStatus::Unknown,
    }
}

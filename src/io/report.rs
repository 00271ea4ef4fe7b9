//! Result output: JSON record and plain-text summary.

use std::fmt::Write as _;
use std::io::Write;

use crate::error::VrptwError;
use crate::models::SolveResult;

/// Writes `result` as pretty-printed JSON.
pub fn write_json<W: Write>(result: &SolveResult, mut writer: W) -> Result<(), VrptwError> {
    serde_json::to_writer_pretty(&mut writer, result).map_err(std::io::Error::from)?;
    writeln!(writer)?;
    Ok(())
}

/// Renders the status block and one `Vehicle k: 0 -> ... -> 0` line per route.
///
/// # Examples
///
/// ```
/// use u_vrptw::io::render_summary;
/// use u_vrptw::models::{Route, SolveResult, SolveStatus, Visit};
///
/// let mut route = Route::new(0, 0);
/// route.push_visit(Visit { index: 5, node_id: 5, service_start: 3.0, load: 1.0 });
/// route.push_visit(Visit { index: 3, node_id: 3, service_start: 9.0, load: 2.0 });
/// let result = SolveResult::with_routes(SolveStatus::Optimal, 12.5, vec![route]);
///
/// let text = render_summary(&result);
/// assert!(text.contains("Vehicle 1: 0 -> 5 -> 3 -> 0"));
/// ```
pub fn render_summary(result: &SolveResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Status: {}", result.status);
    match result.objective_value {
        Some(objective) => {
            let _ = writeln!(out, "Objective: {objective:.4}");
        }
        None => {
            let _ = writeln!(out, "Objective: -");
        }
    }
    let _ = writeln!(out, "Vehicles: {}", result.vehicle_count);
    let _ = writeln!(
        out,
        "Cuts: {} in {} rounds ({:.2}s)",
        result.cuts_added, result.rounds, result.elapsed_seconds
    );
    for route in &result.routes {
        let path = route
            .node_ids()
            .iter()
            .map(usize::to_string)
            .collect::<Vec<_>>()
            .join(" -> ");
        let _ = writeln!(out, "Vehicle {}: {}", route.vehicle() + 1, path);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Route, SolveStatus, Visit};

    fn sample() -> SolveResult {
        let mut r = Route::new(0, 0);
        r.push_visit(Visit {
            index: 1,
            node_id: 1,
            service_start: 1.0,
            load: 1.0,
        });
        r.set_distance(2.0);
        let mut result = SolveResult::with_routes(SolveStatus::FeasibleWithinBudget, 2.0, vec![r]);
        result.cuts_added = 3;
        result.rounds = 4;
        result
    }

    #[test]
    fn test_json_fields() {
        let mut buf = Vec::new();
        write_json(&sample(), &mut buf).expect("write");
        let value: serde_json::Value = serde_json::from_slice(&buf).expect("json");
        assert_eq!(value["status"], "feasible_within_budget");
        assert_eq!(value["objective_value"], 2.0);
        assert_eq!(value["vehicle_count"], 1);
        assert_eq!(value["cuts_added"], 3);
        assert_eq!(value["routes"][0]["visits"][0]["node_id"], 1);
    }

    #[test]
    fn test_summary_without_solution() {
        let text = render_summary(&SolveResult::without_solution(SolveStatus::Infeasible));
        assert!(text.starts_with("Status: infeasible\n"));
        assert!(text.contains("Objective: -"));
        assert!(!text.contains("Vehicle 1"));
    }

    #[test]
    fn test_summary_lists_routes() {
        let text = render_summary(&sample());
        assert!(text.contains("Objective: 2.0000"));
        assert!(text.contains("Cuts: 3 in 4 rounds"));
        assert!(text.contains("Vehicle 1: 0 -> 1 -> 0"));
    }
}

//! Route reconstruction from the final arc selection.

use tracing::debug;

use crate::error::{DecodeFault, VrptwError};
use crate::evaluation::RouteEvaluator;
use crate::formulation::VarLayout;
use crate::models::{Instance, Route};

/// Turns a sub-tour-free arc selection into depot-rooted routes.
///
/// Every selected arc `(0, j)` opens a route, which then follows the unique
/// selected successor of each node until it returns to the depot. Each walk
/// marks the nodes it visits, so a repeated node stops decoding after at
/// most `n` steps instead of looping.
///
/// Only the arc values are read. Service starts and loads are recomputed
/// from the instance along the visit order (earliest schedule, cumulative
/// demand), since the solver's `t` and `u` columns are only bounded from
/// below along the route.
///
/// # Examples
///
/// ```
/// use u_vrptw::decode::RouteDecoder;
/// use u_vrptw::formulation::VarLayout;
/// use u_vrptw::models::{Instance, Node, TimeWindow};
///
/// let tw = TimeWindow::new(0.0, 100.0).unwrap();
/// let instance = Instance::new(
///     vec![
///         Node::depot(0.0, 0.0, tw),
///         Node::new(1, 1.0, 0.0, 1.0, tw, 0.0),
///         Node::new(2, 1.0, 1.0, 1.0, tw, 0.0),
///     ],
///     10.0,
/// )
/// .unwrap();
///
/// let layout = VarLayout::new(3);
/// let mut values = vec![0.0; layout.num_variables()];
/// for (i, j) in [(0, 1), (1, 2), (2, 0)] {
///     values[layout.arc(i, j).unwrap().index()] = 1.0;
/// }
///
/// let routes = RouteDecoder::new(&instance, &layout, 0.99).decode(&values).unwrap();
/// assert_eq!(routes.len(), 1);
/// assert_eq!(routes[0].node_ids(), vec![0, 1, 2, 0]);
/// ```
pub struct RouteDecoder<'a> {
    instance: &'a Instance,
    layout: &'a VarLayout,
    threshold: f64,
}

impl<'a> RouteDecoder<'a> {
    pub fn new(instance: &'a Instance, layout: &'a VarLayout, threshold: f64) -> Self {
        Self {
            instance,
            layout,
            threshold,
        }
    }

    /// Decodes `values` into routes, one per selected depot-outgoing arc.
    ///
    /// Fails with [`VrptwError::DecoderInvariantViolation`] if a node is
    /// revisited, a route node lacks a unique successor, or a customer is
    /// left off every route.
    pub fn decode(&self, values: &[f64]) -> Result<Vec<Route>, VrptwError> {
        let n = self.instance.num_nodes();
        let mut successors: Vec<Vec<usize>> = vec![Vec::new(); n];
        for (i, j) in self.layout.selected_arcs(values, self.threshold) {
            successors[i].push(j);
        }

        let evaluator = RouteEvaluator::new(self.instance);
        let mut visited = vec![false; n];
        let mut routes = Vec::with_capacity(successors[0].len());

        for &first in &successors[0] {
            let mut indices = Vec::new();
            let mut current = first;
            loop {
                if visited[current] {
                    return Err(violation(current, DecodeFault::RevisitedNode));
                }
                visited[current] = true;
                indices.push(current);

                let next = match successors[current].as_slice() {
                    [next] => *next,
                    [] => return Err(violation(current, DecodeFault::MissingSuccessor)),
                    _ => return Err(violation(current, DecodeFault::AmbiguousSuccessor)),
                };
                if next == 0 {
                    break;
                }
                current = next;
            }
            // Violations are reported by the session's own evaluation pass.
            let (route, _) = evaluator.build_route(routes.len(), &indices);
            routes.push(route);
        }

        if let Some(missing) = (1..n).find(|&i| !visited[i]) {
            return Err(violation(missing, DecodeFault::UncoveredCustomer));
        }

        debug!(
            component = "decode",
            operation = "decode",
            routes = routes.len() as u64,
            distance = routes.iter().map(Route::distance).sum::<f64>(),
            "Decoded routes"
        );
        Ok(routes)
    }
}

fn violation(node: usize, fault: DecodeFault) -> VrptwError {
    VrptwError::DecoderInvariantViolation { node, fault }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Node, TimeWindow};

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

    fn select(layout: &VarLayout, arcs: &[(usize, usize)]) -> Vec<f64> {
        let mut values = vec![0.0; layout.num_variables()];
        for &(i, j) in arcs {
            values[layout.arc(i, j).expect("arc").index()] = 1.0;
        }
        values
    }

    fn fault(result: Result<Vec<Route>, VrptwError>) -> (usize, DecodeFault) {
        match result {
            Err(VrptwError::DecoderInvariantViolation { node, fault }) => (node, fault),
            other => panic!("expected decoder fault, got {other:?}"),
        }
    }

    #[test]
    fn test_single_route_with_schedule() {
        let inst = square();
        let layout = VarLayout::new(4);
        let values = select(&layout, &[(0, 1), (1, 2), (2, 3), (3, 0)]);
        let routes = RouteDecoder::new(&inst, &layout, 0.99).decode(&values).expect("decode");
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].node_ids(), vec![0, 1, 2, 3, 0]);
        assert!((routes[0].distance() - 4.0).abs() < 1e-10);
        assert_eq!(routes[0].visits()[2].service_start, 3.0);
        assert_eq!(routes[0].load(), 3.0);
    }

    #[test]
    fn test_schedule_ignores_slack_in_time_and_load_columns() {
        // Q = 10 while the route delivers 3; t and u sit at their upper bounds.
        let inst = square();
        let layout = VarLayout::new(4);
        let mut values = select(&layout, &[(0, 3), (3, 2), (2, 1), (1, 0)]);
        for i in 1..4 {
            values[layout.time(i).index()] = 100.0;
            values[layout.load(i).index()] = 10.0;
        }
        let routes = RouteDecoder::new(&inst, &layout, 0.99).decode(&values).expect("decode");
        let visits = routes[0].visits();
        let loads: Vec<f64> = visits.iter().map(|v| v.load).collect();
        let starts: Vec<f64> = visits.iter().map(|v| v.service_start).collect();
        assert_eq!(loads, vec![1.0, 2.0, 3.0]);
        assert_eq!(starts, vec![1.0, 2.0, 3.0]);
        assert_eq!(routes[0].load(), 3.0);
    }

    #[test]
    fn test_partition_across_routes() {
        let inst = square();
        let layout = VarLayout::new(4);
        let values = select(&layout, &[(0, 1), (1, 0), (0, 3), (3, 2), (2, 0)]);
        let routes = RouteDecoder::new(&inst, &layout, 0.99).decode(&values).expect("decode");
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].vehicle(), 0);
        assert_eq!(routes[1].vehicle(), 1);
        let mut served: Vec<usize> = routes.iter().flat_map(Route::indices).collect();
        served.sort_unstable();
        assert_eq!(served, vec![1, 2, 3]);
    }

    #[test]
    fn test_near_threshold_values_selected() {
        let inst = square();
        let layout = VarLayout::new(4);
        let mut values = select(&layout, &[(0, 1), (1, 2), (2, 3), (3, 0)]);
        values[layout.arc(1, 2).expect("arc").index()] = 0.9931;
        values[layout.arc(1, 3).expect("arc").index()] = 0.0069;
        let routes = RouteDecoder::new(&inst, &layout, 0.99).decode(&values).expect("decode");
        assert_eq!(routes[0].indices(), vec![1, 2, 3]);
    }

    #[test]
    fn test_revisit_detected() {
        let inst = square();
        let layout = VarLayout::new(4);
        // 0 -> 1 -> 2 -> 1: loops without returning to the depot
        let values = select(&layout, &[(0, 1), (1, 2), (2, 1), (3, 0)]);
        let decoded = RouteDecoder::new(&inst, &layout, 0.99).decode(&values);
        assert_eq!(fault(decoded), (1, DecodeFault::RevisitedNode));
    }

    #[test]
    fn test_missing_successor() {
        let inst = square();
        let layout = VarLayout::new(4);
        let values = select(&layout, &[(0, 1), (1, 2)]);
        let decoded = RouteDecoder::new(&inst, &layout, 0.99).decode(&values);
        assert_eq!(fault(decoded), (2, DecodeFault::MissingSuccessor));
    }

    #[test]
    fn test_ambiguous_successor() {
        let inst = square();
        let layout = VarLayout::new(4);
        let values = select(&layout, &[(0, 1), (1, 2), (1, 3), (2, 0), (3, 0)]);
        let decoded = RouteDecoder::new(&inst, &layout, 0.99).decode(&values);
        assert_eq!(fault(decoded), (1, DecodeFault::AmbiguousSuccessor));
    }

    #[test]
    fn test_subtour_leaves_customers_uncovered() {
        let inst = square();
        let layout = VarLayout::new(4);
        let values = select(&layout, &[(0, 1), (1, 0), (2, 3), (3, 2)]);
        let decoded = RouteDecoder::new(&inst, &layout, 0.99).decode(&values);
        assert_eq!(fault(decoded), (2, DecodeFault::UncoveredCustomer));
    }
}

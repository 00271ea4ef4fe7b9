//! Route evaluator that recomputes timing, load, and feasibility.

use super::{Violation, ViolationType};
use crate::models::{Instance, Route, Visit};

/// Slack allowed on time and load comparisons.
const TOLERANCE: f64 = 1e-6;

/// Recomputes each route's earliest service schedule and cumulative load
/// from the instance data, independent of the solver's `t`/`u` values, and
/// checks capacity, time windows and the customer partition.
///
/// # Examples
///
/// ```
/// use u_vrptw::evaluation::RouteEvaluator;
/// use u_vrptw::models::{Instance, Node, TimeWindow};
///
/// let tw = TimeWindow::new(0.0, 100.0).unwrap();
/// let instance = Instance::new(
///     vec![
///         Node::depot(0.0, 0.0, tw),
///         Node::new(1, 3.0, 4.0, 10.0, tw, 5.0),
///         Node::new(2, 6.0, 8.0, 20.0, tw, 5.0),
///     ],
///     100.0,
/// )
/// .unwrap();
///
/// let evaluator = RouteEvaluator::new(&instance);
/// let (route, violations) = evaluator.build_route(0, &[1, 2]);
/// assert_eq!(route.len(), 2);
/// assert!(violations.is_empty());
/// ```
pub struct RouteEvaluator<'a> {
    instance: &'a Instance,
}

impl<'a> RouteEvaluator<'a> {
    pub fn new(instance: &'a Instance) -> Self {
        Self { instance }
    }

    /// Builds a route from customer node indices, starting at the depot's
    /// ready time and waiting at each node until its window opens.
    ///
    /// Returns the route and any capacity or time-window violations.
    pub fn build_route(&self, vehicle: usize, indices: &[usize]) -> (Route, Vec<Violation>) {
        let instance = self.instance;
        let depot = instance.depot();
        let mut route = Route::new(vehicle, depot.id());
        let mut violations = Vec::new();
        let mut current_time = depot.ready();
        let mut load = 0.0;
        let mut distance = 0.0;
        let mut prev = 0;

        for &idx in indices {
            let travel = instance.distance(prev, idx);
            distance += travel;
            let arrival = current_time + instance.node(prev).service() + travel;
            let node = instance.node(idx);

            if arrival > node.due() + TOLERANCE {
                violations.push(Violation::new(ViolationType::TimeWindowViolated {
                    node: idx,
                    arrival,
                    due: node.due(),
                }));
            }
            let service_start = arrival.max(node.ready());
            load += node.demand();

            route.push_visit(Visit {
                index: idx,
                node_id: node.id(),
                service_start,
                load,
            });

            current_time = service_start;
            prev = idx;
        }

        distance += instance.distance(prev, 0);
        route.set_distance(distance);

        if load > instance.capacity() + TOLERANCE {
            violations.push(Violation::new(ViolationType::CapacityExceeded {
                route_index: vehicle,
                load,
                capacity: instance.capacity(),
            }));
        }

        (route, violations)
    }

    /// Checks that every customer is served exactly once across `routes`.
    pub fn check_partition(&self, routes: &[Route]) -> Vec<Violation> {
        let mut counts = vec![0usize; self.instance.num_nodes()];
        for route in routes {
            for visit in route.visits() {
                counts[visit.index] += 1;
            }
        }
        counts
            .iter()
            .enumerate()
            .skip(1)
            .filter_map(|(node, &count)| match count {
                0 => Some(Violation::new(ViolationType::Uncovered { node })),
                1 => None,
                _ => Some(Violation::new(ViolationType::Duplicate { node, count })),
            })
            .collect()
    }

    /// Re-evaluates decoded routes: per-route schedule and load, then the
    /// partition over all routes.
    pub fn evaluate(&self, routes: &[Route]) -> Vec<Violation> {
        let mut all = Vec::new();
        for (idx, route) in routes.iter().enumerate() {
            let (_, mut violations) = self.build_route(idx, &route.indices());
            all.append(&mut violations);
        }
        all.extend(self.check_partition(routes));
        all
    }
}

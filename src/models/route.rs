//! Route and visit types.

use serde::Serialize;

/// A customer visit within a decoded route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Visit {
    /// Node index within the instance.
    pub index: usize,
    /// Node id as given by the instance.
    pub node_id: usize,
    /// Earliest service start along the route, waiting for the window to open.
    pub service_start: f64,
    /// Demand delivered up to and including this visit.
    pub load: f64,
}

/// An ordered sequence of customer visits served by one vehicle.
///
/// The route starts and ends at the depot; the depot is not stored in
/// `visits` but appears at both ends of [`node_ids`](Route::node_ids).
///
/// # Examples
///
/// ```
/// use u_vrptw::models::{Route, Visit};
///
/// let mut route = Route::new(0, 0);
/// route.push_visit(Visit { index: 3, node_id: 3, service_start: 10.0, load: 4.0 });
/// route.push_visit(Visit { index: 1, node_id: 1, service_start: 25.0, load: 9.0 });
/// assert_eq!(route.node_ids(), vec![0, 3, 1, 0]);
/// assert_eq!(route.load(), 9.0);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Route {
    vehicle: usize,
    depot_id: usize,
    visits: Vec<Visit>,
    distance: f64,
}

impl Route {
    /// Creates an empty route for the given vehicle.
    pub fn new(vehicle: usize, depot_id: usize) -> Self {
        Self {
            vehicle,
            depot_id,
            visits: Vec::new(),
            distance: 0.0,
        }
    }

    /// Appends a visit to the end of this route.
    pub fn push_visit(&mut self, visit: Visit) {
        self.visits.push(visit);
    }

    /// Zero-based vehicle number.
    pub fn vehicle(&self) -> usize {
        self.vehicle
    }

    pub fn visits(&self) -> &[Visit] {
        &self.visits
    }

    /// Number of customers served.
    pub fn len(&self) -> usize {
        self.visits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }

    /// Customer node indices in visit order.
    pub fn indices(&self) -> Vec<usize> {
        self.visits.iter().map(|v| v.index).collect()
    }

    /// Full node id sequence, depot to depot.
    pub fn node_ids(&self) -> Vec<usize> {
        let mut ids = Vec::with_capacity(self.visits.len() + 2);
        ids.push(self.depot_id);
        ids.extend(self.visits.iter().map(|v| v.node_id));
        ids.push(self.depot_id);
        ids
    }

    /// Travel distance depot to depot.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn set_distance(&mut self, distance: f64) {
        self.distance = distance;
    }

    /// Load on arrival at the last customer, i.e. the total delivered.
    pub fn load(&self) -> f64 {
        self.visits.last().map_or(0.0, |v| v.load)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visit(index: usize, load: f64) -> Visit {
        Visit {
            index,
            node_id: index + 100,
            service_start: 0.0,
            load,
        }
    }

    #[test]
    fn test_route_empty() {
        let r = Route::new(2, 0);
        assert!(r.is_empty());
        assert_eq!(r.vehicle(), 2);
        assert_eq!(r.load(), 0.0);
        assert_eq!(r.node_ids(), vec![0, 0]);
    }

    #[test]
    fn test_ids_differ_from_indices() {
        let mut r = Route::new(0, 7);
        r.push_visit(visit(2, 3.0));
        r.push_visit(visit(1, 8.0));
        r.set_distance(12.5);
        assert_eq!(r.indices(), vec![2, 1]);
        assert_eq!(r.node_ids(), vec![7, 102, 101, 7]);
        assert_eq!(r.len(), 2);
        assert_eq!(r.distance(), 12.5);
        assert_eq!(r.load(), 8.0);
    }
}

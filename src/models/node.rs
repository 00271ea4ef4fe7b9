//! Node and time window types.

use serde::{Deserialize, Serialize};

/// A service time window `[ready, due]`.
///
/// Service at a node may start no earlier than `ready` and no later than
/// `due`. A vehicle arriving early waits.
///
/// # Examples
///
/// ```
/// use u_vrptw::models::TimeWindow;
///
/// let tw = TimeWindow::new(100.0, 200.0).unwrap();
/// assert!(tw.contains(150.0));
/// assert!(!tw.contains(250.0));
/// assert!(TimeWindow::new(10.0, 10.0).unwrap().is_point());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    ready: f64,
    due: f64,
}

impl TimeWindow {
    /// Creates a new time window.
    ///
    /// Returns `None` if `ready > due`, either bound is negative, or either
    /// value is non-finite.
    pub fn new(ready: f64, due: f64) -> Option<Self> {
        if !ready.is_finite() || !due.is_finite() || ready < 0.0 || ready > due {
            return None;
        }
        Some(Self { ready, due })
    }

    /// Earliest service start.
    pub fn ready(&self) -> f64 {
        self.ready
    }

    /// Latest service start.
    pub fn due(&self) -> f64 {
        self.due
    }

    /// Returns `true` if service may start at `time`.
    pub fn contains(&self, time: f64) -> bool {
        time >= self.ready && time <= self.due
    }

    /// Returns `true` if the window admits exactly one start time.
    pub fn is_point(&self) -> bool {
        self.ready == self.due
    }
}

/// A location of a VRPTW instance: the depot (index 0) or a customer.
///
/// # Examples
///
/// ```
/// use u_vrptw::models::{Node, TimeWindow};
///
/// let horizon = TimeWindow::new(0.0, 1236.0).unwrap();
/// let depot = Node::depot(40.0, 50.0, horizon);
/// assert_eq!(depot.id(), 0);
/// assert_eq!(depot.demand(), 0.0);
///
/// let c = Node::new(1, 45.0, 68.0, 10.0, TimeWindow::new(912.0, 967.0).unwrap(), 90.0);
/// assert_eq!(c.service(), 90.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    id: usize,
    x: f64,
    y: f64,
    demand: f64,
    time_window: TimeWindow,
    service: f64,
}

impl Node {
    pub fn new(
        id: usize,
        x: f64,
        y: f64,
        demand: f64,
        time_window: TimeWindow,
        service: f64,
    ) -> Self {
        Self {
            id,
            x,
            y,
            demand,
            time_window,
            service,
        }
    }

    /// Creates a depot (id 0, no demand, no service) whose window is the planning horizon.
    pub fn depot(x: f64, y: f64, horizon: TimeWindow) -> Self {
        Self::new(0, x, y, 0.0, horizon, 0.0)
    }

    /// Node id as given by the instance.
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn demand(&self) -> f64 {
        self.demand
    }

    pub fn time_window(&self) -> &TimeWindow {
        &self.time_window
    }

    pub fn ready(&self) -> f64 {
        self.time_window.ready()
    }

    pub fn due(&self) -> f64 {
        self.time_window.due()
    }

    /// Service duration.
    pub fn service(&self) -> f64 {
        self.service
    }

    /// Euclidean distance to another node.
    pub fn distance_to(&self, other: &Node) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(ready: f64, due: f64) -> TimeWindow {
        TimeWindow::new(ready, due).expect("valid window")
    }

    #[test]
    fn test_time_window_invalid() {
        assert!(TimeWindow::new(20.0, 10.0).is_none());
        assert!(TimeWindow::new(-1.0, 10.0).is_none());
        assert!(TimeWindow::new(f64::NAN, 10.0).is_none());
        assert!(TimeWindow::new(10.0, f64::INFINITY).is_none());
    }

    #[test]
    fn test_time_window_bounds_inclusive() {
        let tw = window(10.0, 20.0);
        assert!(tw.contains(10.0));
        assert!(tw.contains(20.0));
        assert!(!tw.contains(9.9));
        assert!(!tw.contains(20.1));
        assert!(!tw.is_point());
    }

    #[test]
    fn test_point_window() {
        let tw = window(42.0, 42.0);
        assert!(tw.is_point());
        assert!(tw.contains(42.0));
        assert!(!tw.contains(42.5));
    }

    #[test]
    fn test_depot() {
        let d = Node::depot(35.0, 35.0, window(0.0, 230.0));
        assert_eq!(d.id(), 0);
        assert_eq!(d.demand(), 0.0);
        assert_eq!(d.service(), 0.0);
        assert_eq!(d.due(), 230.0);
    }

    #[test]
    fn test_distance() {
        let a = Node::new(1, 0.0, 0.0, 1.0, window(0.0, 10.0), 0.0);
        let b = Node::new(2, 3.0, 4.0, 1.0, window(0.0, 10.0), 0.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-10);
        assert!((b.distance_to(&a) - 5.0).abs() < 1e-10);
    }
}

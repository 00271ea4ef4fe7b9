//! Immutable VRPTW instance.

use std::collections::HashSet;

use super::Node;
use crate::distance::DistanceMatrix;
use crate::error::VrptwError;

/// A validated VRPTW instance: depot plus customers, vehicle capacity,
/// optional fleet bound and the arc distances.
///
/// Node index 0 is the depot. All other indices are customers. Once built
/// the instance is read-only for the rest of a solve.
///
/// # Examples
///
/// ```
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
/// .unwrap()
/// .with_fleet_size(2)
/// .unwrap();
///
/// assert_eq!(instance.num_customers(), 2);
/// assert_eq!(instance.fleet_size(), Some(2));
/// assert!((instance.distance(0, 1) - 1.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct Instance {
    name: String,
    nodes: Vec<Node>,
    capacity: f64,
    fleet_size: Option<usize>,
    distances: DistanceMatrix,
}

impl Instance {
    /// Validates the node list and capacity and computes Euclidean distances.
    ///
    /// Fails with [`VrptwError::MalformedInstance`] before anything else is
    /// built if the depot is missing, the capacity is not positive, or any
    /// node carries invalid data.
    pub fn new(nodes: Vec<Node>, capacity: f64) -> Result<Self, VrptwError> {
        validate(&nodes, capacity)?;
        let distances = DistanceMatrix::from_nodes(&nodes);
        Ok(Self {
            name: String::new(),
            nodes,
            capacity,
            fleet_size: None,
            distances,
        })
    }

    /// Sets the instance name used in logs and reports.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Bounds the number of routes leaving the depot.
    pub fn with_fleet_size(mut self, fleet_size: usize) -> Result<Self, VrptwError> {
        if fleet_size == 0 {
            return Err(VrptwError::malformed(None, "fleet size must be positive"));
        }
        self.fleet_size = Some(fleet_size);
        Ok(self)
    }

    /// Replaces the Euclidean distances with an explicit matrix.
    pub fn with_distances(mut self, distances: DistanceMatrix) -> Result<Self, VrptwError> {
        if distances.size() != self.nodes.len() {
            return Err(VrptwError::malformed(
                None,
                format!(
                    "distance matrix has {} locations, instance has {}",
                    distances.size(),
                    self.nodes.len()
                ),
            ));
        }
        self.distances = distances;
        Ok(self)
    }

    /// Keeps the depot and the first `n` customers.
    ///
    /// Distances are recomputed from coordinates; an explicit matrix set via
    /// [`with_distances`](Self::with_distances) is not carried over.
    pub fn truncated(&self, n: usize) -> Result<Self, VrptwError> {
        let keep = (n + 1).min(self.nodes.len());
        let mut instance = Self::new(self.nodes[..keep].to_vec(), self.capacity)?;
        instance.name = self.name.clone();
        instance.fleet_size = self.fleet_size;
        Ok(instance)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// All nodes, depot first.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, index: usize) -> &Node {
        &self.nodes[index]
    }

    pub fn depot(&self) -> &Node {
        &self.nodes[0]
    }

    /// Customers, i.e. every node except the depot.
    pub fn customers(&self) -> &[Node] {
        &self.nodes[1..]
    }

    /// Number of nodes including the depot.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_customers(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Vehicle capacity `Q`.
    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    /// Fleet bound `K`, if any.
    pub fn fleet_size(&self) -> Option<usize> {
        self.fleet_size
    }

    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.distances.get(from, to)
    }

    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    pub fn max_demand(&self) -> f64 {
        self.nodes.iter().map(Node::demand).fold(0.0, f64::max)
    }

    pub fn max_due(&self) -> f64 {
        self.nodes.iter().map(Node::due).fold(0.0, f64::max)
    }

    pub fn max_service(&self) -> f64 {
        self.nodes.iter().map(Node::service).fold(0.0, f64::max)
    }
}

fn validate(nodes: &[Node], capacity: f64) -> Result<(), VrptwError> {
    if nodes.is_empty() {
        return Err(VrptwError::malformed(None, "instance has no depot"));
    }
    if !capacity.is_finite() || capacity <= 0.0 {
        return Err(VrptwError::malformed(
            None,
            format!("capacity must be positive, got {capacity}"),
        ));
    }
    if nodes[0].demand() != 0.0 {
        return Err(VrptwError::malformed(Some(0), "depot demand must be zero"));
    }

    let mut seen = HashSet::with_capacity(nodes.len());
    for (index, node) in nodes.iter().enumerate() {
        if !seen.insert(node.id()) {
            return Err(VrptwError::malformed(
                Some(index),
                format!("duplicate node id {}", node.id()),
            ));
        }
        if !node.x().is_finite() || !node.y().is_finite() {
            return Err(VrptwError::malformed(Some(index), "non-finite coordinates"));
        }
        if !node.demand().is_finite() || node.demand() < 0.0 {
            return Err(VrptwError::malformed(Some(index), "negative or non-finite demand"));
        }
        if !node.service().is_finite() || node.service() < 0.0 {
            return Err(VrptwError::malformed(
                Some(index),
                "negative or non-finite service time",
            ));
        }
        // Deserialized windows bypass TimeWindow::new.
        let tw = node.time_window();
        if !tw.ready().is_finite()
            || !tw.due().is_finite()
            || tw.ready() < 0.0
            || tw.ready() > tw.due()
        {
            return Err(VrptwError::malformed(
                Some(index),
                format!("invalid time window [{}, {}]", tw.ready(), tw.due()),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimeWindow;

    fn tw(ready: f64, due: f64) -> TimeWindow {
        TimeWindow::new(ready, due).expect("valid")
    }

    fn nodes() -> Vec<Node> {
        vec![
            Node::depot(0.0, 0.0, tw(0.0, 100.0)),
            Node::new(1, 3.0, 4.0, 5.0, tw(0.0, 50.0), 2.0),
            Node::new(2, 6.0, 8.0, 7.0, tw(10.0, 80.0), 3.0),
            Node::new(3, 0.0, 1.0, 1.0, tw(0.0, 90.0), 1.0),
        ]
    }

    #[test]
    fn test_new_valid() {
        let inst = Instance::new(nodes(), 20.0).expect("valid");
        assert_eq!(inst.num_nodes(), 4);
        assert_eq!(inst.num_customers(), 3);
        assert_eq!(inst.customers()[0].id(), 1);
        assert_eq!(inst.max_demand(), 7.0);
        assert_eq!(inst.max_due(), 100.0);
        assert_eq!(inst.max_service(), 3.0);
        assert!(inst.fleet_size().is_none());
    }

    #[test]
    fn test_rejects_non_positive_capacity() {
        for cap in [0.0, -5.0, f64::NAN] {
            let err = Instance::new(nodes(), cap).expect_err("capacity");
            assert_eq!(err.code(), "INSTANCE_MALFORMED");
        }
    }

    #[test]
    fn test_rejects_empty() {
        assert!(Instance::new(Vec::new(), 10.0).is_err());
    }

    #[test]
    fn test_rejects_depot_demand() {
        let mut n = nodes();
        n[0] = Node::new(0, 0.0, 0.0, 3.0, tw(0.0, 100.0), 0.0);
        assert!(matches!(
            Instance::new(n, 10.0),
            Err(VrptwError::MalformedInstance { node: Some(0), .. })
        ));
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let mut n = nodes();
        n[3] = Node::new(2, 0.0, 1.0, 1.0, tw(0.0, 90.0), 1.0);
        assert!(matches!(
            Instance::new(n, 10.0),
            Err(VrptwError::MalformedInstance { node: Some(3), .. })
        ));
    }

    #[test]
    fn test_rejects_negative_demand_and_service() {
        let mut n = nodes();
        n[1] = Node::new(1, 3.0, 4.0, -1.0, tw(0.0, 50.0), 2.0);
        assert!(Instance::new(n, 10.0).is_err());

        let mut n = nodes();
        n[2] = Node::new(2, 6.0, 8.0, 1.0, tw(0.0, 50.0), -2.0);
        assert!(Instance::new(n, 10.0).is_err());
    }

    #[test]
    fn test_rejects_inverted_window_from_json() {
        let raw = r#"{"id":1,"x":0.0,"y":0.0,"demand":1.0,
                      "time_window":{"ready":9.0,"due":3.0},"service":0.0}"#;
        let bad: Node = serde_json::from_str(raw).expect("json");
        let n = vec![Node::depot(0.0, 0.0, tw(0.0, 10.0)), bad];
        assert!(matches!(
            Instance::new(n, 10.0),
            Err(VrptwError::MalformedInstance { node: Some(1), .. })
        ));
    }

    #[test]
    fn test_fleet_size() {
        let inst = Instance::new(nodes(), 20.0).expect("valid");
        assert!(inst.clone().with_fleet_size(0).is_err());
        assert_eq!(inst.with_fleet_size(3).expect("k").fleet_size(), Some(3));
    }

    #[test]
    fn test_truncated_keeps_prefix() {
        let inst = Instance::new(nodes(), 20.0)
            .expect("valid")
            .with_name("C101")
            .with_fleet_size(2)
            .expect("k");
        let small = inst.truncated(2).expect("truncate");
        assert_eq!(small.num_customers(), 2);
        assert_eq!(small.name(), "C101");
        assert_eq!(small.fleet_size(), Some(2));
        assert_eq!(inst.truncated(50).expect("all").num_customers(), 3);
    }

    #[test]
    fn test_with_distances_size_mismatch() {
        let inst = Instance::new(nodes(), 20.0).expect("valid");
        let dm = DistanceMatrix::from_data(2, vec![0.0; 4]).expect("grid");
        assert!(inst.with_distances(dm).is_err());
    }
}

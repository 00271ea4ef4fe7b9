//! Constraint violations found by the route evaluator.

use serde::Serialize;

/// Kind of constraint violation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ViolationType {
    /// Cumulative demand exceeds the vehicle capacity.
    CapacityExceeded {
        /// Route index in the solution.
        route_index: usize,
        load: f64,
        capacity: f64,
    },
    /// Earliest possible service start is after the node's due time.
    TimeWindowViolated {
        /// Node index where the violation occurred.
        node: usize,
        /// Earliest arrival time.
        arrival: f64,
        due: f64,
    },
    /// A customer is served by no route.
    Uncovered { node: usize },
    /// A customer is served more than once.
    Duplicate { node: usize, count: usize },
}

/// A single constraint violation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    pub kind: ViolationType,
}

impl Violation {
    pub fn new(kind: ViolationType) -> Self {
        Self { kind }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            ViolationType::CapacityExceeded {
                route_index,
                load,
                capacity,
            } => write!(f, "route {route_index}: load {load} exceeds capacity {capacity}"),
            ViolationType::TimeWindowViolated { node, arrival, due } => {
                write!(f, "node {node}: arrival {arrival} after due {due}")
            }
            ViolationType::Uncovered { node } => write!(f, "node {node}: not served"),
            ViolationType::Duplicate { node, count } => {
                write!(f, "node {node}: served {count} times")
            }
        }
    }
}

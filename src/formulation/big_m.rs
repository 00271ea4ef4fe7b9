//! Big-M constants for the conditional propagation constraints.

use serde::{Deserialize, Serialize};

use crate::models::Instance;

/// Big-M coefficients of the time and load propagation constraints.
///
/// The derived values are the smallest instance-wide constants for which
/// `t(j) ≥ t(i) + s(i) + d(i,j) − M_t·(1 − x(i,j))` and
/// `u(j) ≥ u(i) + q(j) − M_c·(1 − x(i,j))` are vacuous whenever `x(i,j) = 0`,
/// given the variable bounds `t(i) ∈ [ready(i), due(i)]` with `ready ≥ 0` and
/// `u(i) ∈ [q(i), Q]`.
///
/// # Examples
///
/// ```
/// use u_vrptw::formulation::BigM;
/// use u_vrptw::models::{Instance, Node, TimeWindow};
///
/// let tw = TimeWindow::new(0.0, 100.0).unwrap();
/// let instance = Instance::new(
///     vec![Node::depot(0.0, 0.0, tw), Node::new(1, 3.0, 4.0, 6.0, tw, 10.0)],
///     20.0,
/// )
/// .unwrap();
///
/// let m = BigM::derive(&instance);
/// assert_eq!(m.time, 100.0 + 10.0 + 5.0);
/// assert_eq!(m.load, 20.0 + 6.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BigM {
    /// `M_t = max(due) + max(service) + max(dist)`.
    pub time: f64,
    /// `M_c = Q + max(demand)`.
    pub load: f64,
}

impl BigM {
    pub fn derive(instance: &Instance) -> Self {
        Self {
            time: instance.max_due() + instance.max_service() + instance.distances().max(),
            load: instance.capacity() + instance.max_demand(),
        }
    }

    /// Returns `true` if both constants are at least those of `other`.
    pub fn dominates(&self, other: &BigM) -> bool {
        self.time >= other.time && self.load >= other.load
    }
}

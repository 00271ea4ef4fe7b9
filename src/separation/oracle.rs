//! Sub-tour separation over near-integral arc selections.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{components, CutPool};
use crate::formulation::{Comparison, LinearConstraint, LinearExpr, VarLayout};

/// Minimum left-hand-side excess for a component to count as violated.
const VIOLATION_EPS: f64 = 1e-6;

/// How many cuts one separation pass reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CutPolicy {
    /// One cut per depot-disconnected component.
    #[default]
    AllComponents,
    /// Only the component with the smallest member, for drivers that take
    /// a single lazy row per callback.
    FirstComponent,
}

/// Separation settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeparationConfig {
    /// Arc values at or above this count as selected.
    pub threshold: f64,
    pub policy: CutPolicy,
}

impl Default for SeparationConfig {
    fn default() -> Self {
        Self {
            threshold: 0.99,
            policy: CutPolicy::AllComponents,
        }
    }
}

/// A sub-tour elimination inequality `Σ_{i,j∈S, i≠j} x(i,j) ≤ |S| − 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct Cut {
    members: Vec<usize>,
    constraint: LinearConstraint,
}

impl Cut {
    /// Builds the cut for node set `members` (sorted and deduplicated here).
    pub fn subtour(layout: &VarLayout, mut members: Vec<usize>) -> Self {
        members.sort_unstable();
        members.dedup();
        let mut expr = LinearExpr::new();
        for &i in &members {
            for &j in &members {
                if let Some(id) = layout.arc(i, j) {
                    expr.add_term(id, 1.0);
                }
            }
        }
        let name = format!(
            "subtour[{}]",
            members.iter().map(usize::to_string).collect::<Vec<_>>().join(",")
        );
        let rhs = members.len() as f64 - 1.0;
        Self {
            constraint: LinearConstraint::new(name, expr, Comparison::LessEqual, rhs),
            members,
        }
    }

    /// Component node indices, ascending.
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    pub fn constraint(&self) -> &LinearConstraint {
        &self.constraint
    }

    pub fn into_constraint(self) -> LinearConstraint {
        self.constraint
    }
}

/// Finds customer components that the selected arcs leave disconnected
/// from the depot and emits one violated cut per component.
///
/// Components are computed over all nodes including the depot, so a
/// depot-rooted path is never reported. A component is reported only if it
/// has at least two members and the current values violate its cut.
///
/// # Examples
///
/// ```
/// use u_vrptw::formulation::VarLayout;
/// use u_vrptw::separation::{SeparationConfig, SeparationOracle};
///
/// // depot 0 serves 1 alone; 2 -> 3 -> 2 is a sub-tour
/// let layout = VarLayout::new(4);
/// let mut values = vec![0.0; layout.num_variables()];
/// for (i, j) in [(0, 1), (1, 0), (2, 3), (3, 2)] {
///     values[layout.arc(i, j).unwrap().index()] = 1.0;
/// }
///
/// let oracle = SeparationOracle::new(&layout, SeparationConfig::default());
/// let cuts = oracle.separate(&values);
/// assert_eq!(cuts.len(), 1);
/// assert_eq!(cuts[0].members(), &[2, 3]);
/// ```
#[derive(Debug, Clone)]
pub struct SeparationOracle<'a> {
    layout: &'a VarLayout,
    config: SeparationConfig,
}

impl<'a> SeparationOracle<'a> {
    pub fn new(layout: &'a VarLayout, config: SeparationConfig) -> Self {
        Self { layout, config }
    }

    pub fn config(&self) -> &SeparationConfig {
        &self.config
    }

    /// Violated sub-tour cuts for `values`, ordered by smallest member.
    pub fn separate(&self, values: &[f64]) -> Vec<Cut> {
        let n = self.layout.num_nodes();
        let comps = components(n, self.layout.selected_arcs(values, self.config.threshold));
        let num_components = comps.len();

        let mut cuts = Vec::new();
        for members in comps {
            if members.len() < 2 || members.contains(&0) {
                continue;
            }
            let cut = Cut::subtour(self.layout, members);
            if cut.constraint().violation(values) > VIOLATION_EPS {
                cuts.push(cut);
                if self.config.policy == CutPolicy::FirstComponent {
                    break;
                }
            }
        }

        debug!(
            component = "separation",
            operation = "separate",
            components = num_components as u64,
            cuts = cuts.len() as u64,
            "Separation pass"
        );
        cuts
    }

    /// Separates `values` and records the cuts in `pool`.
    ///
    /// Returns the constraints of every cut `values` violates, including
    /// cuts the pool already held.
    pub fn separate_into(&self, values: &[f64], pool: &CutPool) -> Vec<LinearConstraint> {
        let cuts = self.separate(values);
        if cuts.is_empty() {
            return Vec::new();
        }
        pool.append(&cuts);
        cuts.into_iter().map(Cut::into_constraint).collect()
    }
}

//! Arc-based MIP formulation of the VRPTW.
//!
//! - [`FormulationBuilder`]: builds variables, base constraints and objective
//! - [`VarLayout`]: column positions of `x(i,j)`, `t(i)` and `u(i)`
//! - [`BigM`]: constants of the conditional time and load propagation rows

mod big_m;
mod builder;
mod expr;
mod layout;

pub use big_m::BigM;
pub use builder::{Formulation, FormulationBuilder};
pub use expr::{Comparison, LinearConstraint, LinearExpr, VarId, VarKind, Variable};
pub use layout::VarLayout;

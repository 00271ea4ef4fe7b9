//! Independent feasibility check of decoded routes.

mod evaluator;
mod violation;

pub use evaluator::RouteEvaluator;
pub use violation::{Violation, ViolationType};

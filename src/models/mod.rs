//! Domain model types for the VRPTW.
//!
//! The instance side (nodes with demands and time windows, capacity, fleet
//! bound) and the output side (decoded routes and the solve result record).

mod instance;
mod node;
mod result;
mod route;

pub use instance::Instance;
pub use node::{Node, TimeWindow};
pub use result::{SolveResult, SolveStatus};
pub use route::{Route, Visit};

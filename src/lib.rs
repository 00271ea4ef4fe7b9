//! # u-vrptw
//!
//! Exact solver core for the Vehicle Routing Problem with Time Windows:
//! an arc-based MIP with big-M time and load propagation, solved by row
//! generation with lazy sub-tour elimination cuts.
//!
//! ## Modules
//!
//! - [`models`] — Instance, node, route and result types
//! - [`distance`] — Euclidean distance matrix
//! - [`formulation`] — Variables, base constraints and objective
//! - [`separation`] — Sub-tour separation oracle and cut pool
//! - [`decode`] — Route reconstruction from the final arc selection
//! - [`evaluation`] — Independent schedule, load and partition check
//! - [`solver`] — Solver configuration, driver seam, HiGHS driver, session
//! - [`io`] — Solomon reader, result reports, logging setup
//!
//! ## Example
//!
//! ```no_run
//! use u_vrptw::io::read_solomon_file;
//! use u_vrptw::solver::{solve, SolverConfig};
//!
//! let instance = read_solomon_file("C101.txt", Some(25)).unwrap();
//! let result = solve(&instance, SolverConfig::default()).unwrap();
//! for route in &result.routes {
//!     println!("{:?}", route.node_ids());
//! }
//! ```

pub mod decode;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod formulation;
pub mod io;
pub mod models;
pub mod separation;
pub mod solver;

pub use error::VrptwError;

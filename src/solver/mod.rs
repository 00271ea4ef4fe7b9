//! Solving: configuration, the driver seam, HiGHS row generation and the
//! per-instance session that ties formulation, separation and decoding
//! together.

mod config;
mod driver;
#[cfg(feature = "highs")]
mod highs_driver;
mod session;
mod status;

pub use config::SolverConfig;
pub use driver::{DriverOutcome, LazyConstraintCallback, SolverDriver};
#[cfg(feature = "highs")]
pub use highs_driver::HighsDriver;
pub use session::SolveSession;
pub use status::DriverStatus;

#[cfg(feature = "highs")]
use crate::error::VrptwError;
#[cfg(feature = "highs")]
use crate::models::{Instance, SolveResult};

/// Solves `instance` with the HiGHS driver.
///
/// # Examples
///
/// ```no_run
/// use u_vrptw::io::read_solomon_file;
/// use u_vrptw::solver::{solve, SolverConfig};
///
/// let instance = read_solomon_file("data/C101.txt", Some(25)).unwrap();
/// let result = solve(&instance, SolverConfig::default().with_time_limit(60.0)).unwrap();
/// println!("{}: {:?}", result.status, result.objective_value);
/// ```
#[cfg(feature = "highs")]
pub fn solve(instance: &Instance, config: SolverConfig) -> Result<SolveResult, VrptwError> {
    SolveSession::new(instance, config)?.solve(&mut HighsDriver::new())
}

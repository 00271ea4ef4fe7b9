//! Arc distances.
//!
//! Travel time equals Euclidean distance (unit speed), so the same matrix
//! drives both the objective and the time propagation constraints.

mod matrix;

pub use matrix::DistanceMatrix;

//! Solve configuration.

use serde::{Deserialize, Serialize};

use crate::error::VrptwError;
use crate::separation::{CutPolicy, SeparationConfig};

/// Configuration for a branch-and-cut solve.
///
/// Limits are enforced by the driver; separation settings are read by the
/// oracle and the decoder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Wall-clock limit in seconds over all rounds. `None` means no limit.
    pub time_limit: Option<f64>,
    /// Relative MIP gap tolerance. `None` uses the solver default.
    pub mip_gap: Option<f64>,
    /// Number of solver threads. `None` uses the solver default.
    pub threads: Option<u32>,
    /// Forward solver output to the console.
    pub verbose: bool,
    /// Maximum number of row-generation rounds.
    pub max_rounds: usize,
    /// Gap at or below which a driver-optimal solve counts as proven optimal.
    pub optimality_tolerance: f64,
    pub separation: SeparationConfig,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            time_limit: None,
            mip_gap: None,
            threads: None,
            verbose: false,
            max_rounds: 1000,
            optimality_tolerance: 1e-4,
            separation: SeparationConfig::default(),
        }
    }
}

impl SolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the time limit in seconds.
    pub fn with_time_limit(mut self, seconds: f64) -> Self {
        self.time_limit = Some(seconds);
        self
    }

    /// Set the relative MIP gap tolerance.
    pub fn with_mip_gap(mut self, gap: f64) -> Self {
        self.mip_gap = Some(gap);
        self
    }

    pub fn with_threads(mut self, count: u32) -> Self {
        self.threads = Some(count);
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_max_rounds(mut self, rounds: usize) -> Self {
        self.max_rounds = rounds;
        self
    }

    pub fn with_separation_threshold(mut self, threshold: f64) -> Self {
        self.separation.threshold = threshold;
        self
    }

    pub fn with_cut_policy(mut self, policy: CutPolicy) -> Self {
        self.separation.policy = policy;
        self
    }

    /// Rejects settings no driver can honour.
    pub fn validate(&self) -> Result<(), VrptwError> {
        if let Some(limit) = self.time_limit {
            if !limit.is_finite() || limit <= 0.0 {
                return Err(VrptwError::InvalidConfig(format!(
                    "time_limit must be positive, got {limit}"
                )));
            }
        }
        if let Some(gap) = self.mip_gap {
            if !(0.0..1.0).contains(&gap) {
                return Err(VrptwError::InvalidConfig(format!(
                    "mip_gap must lie in [0, 1), got {gap}"
                )));
            }
        }
        let threshold = self.separation.threshold;
        if !(threshold > 0.5 && threshold <= 1.0) {
            return Err(VrptwError::InvalidConfig(format!(
                "separation threshold must lie in (0.5, 1], got {threshold}"
            )));
        }
        if self.max_rounds == 0 {
            return Err(VrptwError::InvalidConfig("max_rounds must be positive".into()));
        }
        if !self.optimality_tolerance.is_finite() || self.optimality_tolerance < 0.0 {
            return Err(VrptwError::InvalidConfig(format!(
                "optimality_tolerance must be non-negative, got {}",
                self.optimality_tolerance
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = SolverConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.separation.threshold, 0.99);
        assert_eq!(config.max_rounds, 1000);
    }

    #[test]
    fn test_builder() {
        let config = SolverConfig::new()
            .with_time_limit(30.0)
            .with_mip_gap(0.01)
            .with_threads(2)
            .with_cut_policy(CutPolicy::FirstComponent);
        assert_eq!(config.time_limit, Some(30.0));
        assert_eq!(config.mip_gap, Some(0.01));
        assert_eq!(config.threads, Some(2));
        assert_eq!(config.separation.policy, CutPolicy::FirstComponent);
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let bad = [
            SolverConfig::new().with_time_limit(0.0),
            SolverConfig::new().with_time_limit(f64::NAN),
            SolverConfig::new().with_mip_gap(1.0),
            SolverConfig::new().with_mip_gap(-0.1),
            SolverConfig::new().with_separation_threshold(0.5),
            SolverConfig::new().with_separation_threshold(1.01),
            SolverConfig::new().with_max_rounds(0),
        ];
        for config in bad {
            let err = config.validate().expect_err("invalid");
            assert_eq!(err.code(), "CONFIG_INVALID");
        }
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let raw = r#"{"time_limit": 60.0, "separation": {"policy": "first_component"}}"#;
        let config: SolverConfig = serde_json::from_str(raw).expect("json");
        assert_eq!(config.time_limit, Some(60.0));
        assert_eq!(config.max_rounds, 1000);
        assert_eq!(config.separation.threshold, 0.99);
        assert_eq!(config.separation.policy, CutPolicy::FirstComponent);
    }
}

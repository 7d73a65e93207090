//! Calibration configuration from TOML (`[calibration]` section)

use serde::{Deserialize, Serialize};
use ttseval_domain::CalibrationPolicy;

/// Raw calibration configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCalibrationConfig {
    /// Largest error still counted as correct
    pub tolerance: f64,
    /// Accuracy percentage needed to pass
    pub pass_threshold: f64,
}

impl Default for FileCalibrationConfig {
    fn default() -> Self {
        let policy = CalibrationPolicy::default();
        Self {
            tolerance: policy.tolerance,
            pass_threshold: policy.pass_threshold,
        }
    }
}

impl FileCalibrationConfig {
    pub fn to_policy(&self) -> CalibrationPolicy {
        CalibrationPolicy {
            tolerance: self.tolerance,
            pass_threshold: self.pass_threshold,
        }
    }
}

//! Evaluation session configuration.

use ttseval_domain::{CalibrationPolicy, ScoreScale, WorkflowVariant};

/// Settings the workflow controller and session use case run under
///
/// Set once at startup from the merged file/CLI configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EvalConfig {
    pub variant: WorkflowVariant,
    pub calibration: CalibrationPolicy,
}

impl EvalConfig {
    pub fn new(variant: WorkflowVariant) -> Self {
        Self {
            variant,
            calibration: CalibrationPolicy::default(),
        }
    }

    pub fn with_calibration(mut self, calibration: CalibrationPolicy) -> Self {
        self.calibration = calibration;
        self
    }

    /// Score scale for the configured variant
    pub fn scale(&self) -> ScoreScale {
        self.variant.scale()
    }
}

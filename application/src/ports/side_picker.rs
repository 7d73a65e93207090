//! Randomization port for blind presentation and quiz order

use ttseval_domain::{Side, Subject};

/// Source of the random choices a session needs
///
/// Blind comparisons draw the baseline's side independently for every
/// presentation; calibration quizzes shuffle their reference samples.
pub trait SidePicker: Send + Sync {
    /// Side on which the baseline of the next pair is shown
    fn baseline_side(&self) -> Side;

    /// Reorder subjects in place
    fn shuffle(&self, subjects: &mut [Subject]);
}

/// Deterministic picker: constant side, order untouched
pub struct FixedSidePicker {
    side: Side,
}

impl FixedSidePicker {
    pub fn new(side: Side) -> Self {
        Self { side }
    }
}

impl Default for FixedSidePicker {
    fn default() -> Self {
        Self::new(Side::Left)
    }
}

impl SidePicker for FixedSidePicker {
    fn baseline_side(&self) -> Side {
        self.side
    }

    fn shuffle(&self, _subjects: &mut [Subject]) {}
}

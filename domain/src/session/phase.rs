//! Workflow phases

use serde::{Deserialize, Serialize};

/// Phase of an evaluation session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Waiting for the rater's name
    Identify,
    /// Choosing a model, model pair or calibration set
    SelectSubject,
    /// Scoring subjects one by one
    Rate,
    /// Choosing between the two sides of each pair without labels
    BlindCompare,
    /// The current subject set has been fully traversed
    Done,
}

impl Phase {
    pub fn as_str(&self) -> &str {
        match self {
            Phase::Identify => "identify",
            Phase::SelectSubject => "select_subject",
            Phase::Rate => "rate",
            Phase::BlindCompare => "blind_compare",
            Phase::Done => "done",
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Phase::Identify => "Identify",
            Phase::SelectSubject => "Select Subject",
            Phase::Rate => "Rate",
            Phase::BlindCompare => "Blind Compare",
            Phase::Done => "Done",
        }
    }

    /// Whether the phase walks a cursor over a sequence
    pub fn has_cursor(&self) -> bool {
        matches!(self, Phase::Rate | Phase::BlindCompare)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

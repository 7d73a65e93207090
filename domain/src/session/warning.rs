//! Recoverable workflow rejections

use super::phase::Phase;
use super::variant::WorkflowVariant;
use crate::core::score::ScoreScale;
use thiserror::Error;

/// Why an action was rejected without changing the session
///
/// None of these are fatal: the rater stays where they were and may retry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkflowWarning {
    #[error("Please enter your name to start")]
    InvalidName,

    #[error("No matching subjects for {0}")]
    EmptySelection(String),

    #[error("{selection} cannot be used in the {variant} workflow")]
    SelectionMismatch {
        variant: WorkflowVariant,
        selection: String,
    },

    #[error("Score {value} is outside the {scale} scale")]
    ScoreOutOfRange { value: i64, scale: ScoreScale },

    #[error("Cannot save record: {0}")]
    InvalidKey(String),

    #[error("'{action}' is not available during {phase}")]
    UnexpectedAction { action: &'static str, phase: Phase },
}

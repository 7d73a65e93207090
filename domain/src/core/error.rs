//! Domain error types

use super::score::ScoreScale;
use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Rater name cannot be empty")]
    EmptyRaterName,

    #[error("Score {value} is outside the {scale} scale")]
    ScoreOutOfRange { value: i64, scale: ScoreScale },

    #[error("Invalid record key: {0}")]
    InvalidKey(String),

    #[error("Unknown workflow variant: {0}")]
    UnknownVariant(String),

    #[error("Unknown preference: {0}")]
    UnknownPreference(String),
}

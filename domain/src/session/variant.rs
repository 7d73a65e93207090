//! Workflow variants

use crate::core::error::DomainError;
use crate::core::score::ScoreScale;
use serde::{Deserialize, Serialize};

/// The front-end flavour a session runs
///
/// | Variant | Selection | BlindCompare | Scale |
/// |---------|-----------|--------------|-------|
/// | `Single` | one model | no | 0-100 |
/// | `Paired` | model pair | no | 0-100 |
/// | `Blind` | model pair | yes | 0-100 |
/// | `Calibration` | reference set | no | 0-10 |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowVariant {
    #[default]
    Single,
    Paired,
    Blind,
    Calibration,
}

impl WorkflowVariant {
    pub fn as_str(&self) -> &str {
        match self {
            WorkflowVariant::Single => "single",
            WorkflowVariant::Paired => "paired",
            WorkflowVariant::Blind => "blind",
            WorkflowVariant::Calibration => "calibration",
        }
    }

    pub fn scale(&self) -> ScoreScale {
        match self {
            WorkflowVariant::Calibration => ScoreScale::Decile,
            _ => ScoreScale::Percent,
        }
    }

    /// Whether the rating phase is followed by a blind comparison
    pub fn has_blind_phase(&self) -> bool {
        matches!(self, WorkflowVariant::Blind)
    }

    /// Whether subject sets are model pairs
    pub fn uses_pairs(&self) -> bool {
        matches!(self, WorkflowVariant::Paired | WorkflowVariant::Blind)
    }

    /// Default store file name, one file per variant
    pub fn default_store_file(&self) -> String {
        format!("{}_eval_log.jsonl", self.as_str())
    }
}

impl std::fmt::Display for WorkflowVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for WorkflowVariant {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "single" => Ok(WorkflowVariant::Single),
            "paired" | "comparison" => Ok(WorkflowVariant::Paired),
            "blind" => Ok(WorkflowVariant::Blind),
            "calibration" | "quiz" => Ok(WorkflowVariant::Calibration),
            other => Err(DomainError::UnknownVariant(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("blind".parse::<WorkflowVariant>().unwrap(), WorkflowVariant::Blind);
        assert_eq!("Quiz".parse::<WorkflowVariant>().unwrap(), WorkflowVariant::Calibration);
        assert!("survey".parse::<WorkflowVariant>().is_err());
    }

    #[test]
    fn test_variant_traits() {
        assert!(WorkflowVariant::Blind.has_blind_phase());
        assert!(!WorkflowVariant::Paired.has_blind_phase());
        assert!(WorkflowVariant::Paired.uses_pairs());
        assert!(!WorkflowVariant::Single.uses_pairs());
        assert_eq!(WorkflowVariant::Calibration.scale(), ScoreScale::Decile);
        assert_eq!(
            WorkflowVariant::Single.default_store_file(),
            "single_eval_log.jsonl"
        );
    }
}

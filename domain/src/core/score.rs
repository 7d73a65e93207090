//! Score value objects

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// Inclusive range a workflow accepts scores in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreScale {
    /// 0 to 100, used by the rating and comparison workflows
    #[default]
    Percent,
    /// 0 to 10, used by the criteria calibration quiz
    Decile,
}

impl ScoreScale {
    pub fn min(&self) -> u8 {
        0
    }

    pub fn max(&self) -> u8 {
        match self {
            ScoreScale::Percent => 100,
            ScoreScale::Decile => 10,
        }
    }

    /// Value shown on the rating control when nothing was saved before
    pub fn default_value(&self) -> u8 {
        match self {
            ScoreScale::Percent => 50,
            ScoreScale::Decile => 5,
        }
    }

    pub fn contains(&self, value: i64) -> bool {
        value >= i64::from(self.min()) && value <= i64::from(self.max())
    }
}

impl std::fmt::Display for ScoreScale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.min(), self.max())
    }
}

/// A rating value that has been checked against its scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Score(u8);

impl Score {
    /// Validate `value` against `scale`
    pub fn new(value: i64, scale: ScoreScale) -> Result<Self, DomainError> {
        if !scale.contains(value) {
            return Err(DomainError::ScoreOutOfRange { value, scale });
        }
        // contains() bounds the value to 0..=100
        Ok(Self(value as u8))
    }

    /// The default value of `scale`
    pub fn default_for(scale: ScoreScale) -> Self {
        Self(scale.default_value())
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_bounds() {
        assert!(Score::new(0, ScoreScale::Percent).is_ok());
        assert!(Score::new(100, ScoreScale::Percent).is_ok());
        assert!(Score::new(-1, ScoreScale::Percent).is_err());
        assert!(Score::new(101, ScoreScale::Percent).is_err());
    }

    #[test]
    fn test_decile_bounds() {
        assert_eq!(Score::new(10, ScoreScale::Decile).unwrap().value(), 10);
        assert_eq!(
            Score::new(11, ScoreScale::Decile),
            Err(DomainError::ScoreOutOfRange {
                value: 11,
                scale: ScoreScale::Decile
            })
        );
    }

    #[test]
    fn test_default_values() {
        assert_eq!(Score::default_for(ScoreScale::Percent).value(), 50);
        assert_eq!(Score::default_for(ScoreScale::Decile).value(), 5);
    }

    #[test]
    fn test_scale_serde() {
        let scale: ScoreScale = serde_json::from_str("\"decile\"").unwrap();
        assert_eq!(scale, ScoreScale::Decile);
        assert_eq!(serde_json::to_string(&Score(72)).unwrap(), "72");
    }
}

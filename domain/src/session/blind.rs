//! Blind comparison presentation

use crate::catalog::pairs::SubjectPair;
use crate::catalog::subject::Subject;
use crate::core::error::DomainError;
use crate::rating::record::Preference;
use serde::{Deserialize, Serialize};

/// Screen side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

/// The choice as the rater sees it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisibleChoice {
    Left,
    Right,
    Tie,
}

impl std::str::FromStr for VisibleChoice {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "left" | "l" | "a" => Ok(VisibleChoice::Left),
            "right" | "r" | "b" => Ok(VisibleChoice::Right),
            "tie" | "t" | "=" => Ok(VisibleChoice::Tie),
            other => Err(DomainError::UnknownPreference(other.to_string())),
        }
    }
}

/// Where the baseline of the current pair is shown
///
/// Drawn independently for every presentation so the rater cannot learn
/// which side is which.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlindPresentation {
    baseline_side: Side,
}

impl BlindPresentation {
    pub fn new(baseline_side: Side) -> Self {
        Self { baseline_side }
    }

    pub fn baseline_side(&self) -> Side {
        self.baseline_side
    }

    /// Map a visible choice back to the semantic label
    pub fn resolve(&self, choice: VisibleChoice) -> Preference {
        match (choice, self.baseline_side) {
            (VisibleChoice::Tie, _) => Preference::Tie,
            (VisibleChoice::Left, Side::Left) | (VisibleChoice::Right, Side::Right) => {
                Preference::Baseline
            }
            (VisibleChoice::Left, Side::Right) | (VisibleChoice::Right, Side::Left) => {
                Preference::Experimental
            }
        }
    }

    pub fn left<'a>(&self, pair: &'a SubjectPair) -> &'a Subject {
        match self.baseline_side {
            Side::Left => &pair.baseline,
            Side::Right => &pair.experimental,
        }
    }

    pub fn right<'a>(&self, pair: &'a SubjectPair) -> &'a Subject {
        match self.baseline_side {
            Side::Left => &pair.experimental,
            Side::Right => &pair.baseline,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> SubjectPair {
        SubjectPair {
            baseline: Subject::new("base", "b.wav", "t", 0),
            experimental: Subject::new("exp", "e.wav", "t", 0),
        }
    }

    #[test]
    fn test_resolve_baseline_on_left() {
        let p = BlindPresentation::new(Side::Left);
        assert_eq!(p.resolve(VisibleChoice::Left), Preference::Baseline);
        assert_eq!(p.resolve(VisibleChoice::Right), Preference::Experimental);
        assert_eq!(p.resolve(VisibleChoice::Tie), Preference::Tie);
    }

    #[test]
    fn test_resolve_baseline_on_right() {
        let p = BlindPresentation::new(Side::Right);
        assert_eq!(p.resolve(VisibleChoice::Left), Preference::Experimental);
        assert_eq!(p.resolve(VisibleChoice::Right), Preference::Baseline);
        assert_eq!(p.resolve(VisibleChoice::Tie), Preference::Tie);
    }

    #[test]
    fn test_sides_follow_mapping() {
        let pair = pair();
        let swapped = BlindPresentation::new(Side::Right);
        assert_eq!(swapped.left(&pair).model_id, "exp");
        assert_eq!(swapped.right(&pair).model_id, "base");
    }

    #[test]
    fn test_visible_choice_from_str() {
        assert_eq!("L".parse::<VisibleChoice>().unwrap(), VisibleChoice::Left);
        assert_eq!("right".parse::<VisibleChoice>().unwrap(), VisibleChoice::Right);
        assert_eq!("tie".parse::<VisibleChoice>().unwrap(), VisibleChoice::Tie);
        assert!("baseline".parse::<VisibleChoice>().is_err());
    }
}

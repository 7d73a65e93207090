//! Rater name value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// The self-reported name of a rater (Value Object)
///
/// Always stored trimmed. The name is the `rater_id` component of every
/// record key, so it is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RaterName {
    name: String,
}

impl RaterName {
    /// Try to create a rater name, returning None if blank
    pub fn try_new(name: impl AsRef<str>) -> Option<Self> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self {
                name: trimmed.to_string(),
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for RaterName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl TryFrom<String> for RaterName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_new(value).ok_or(DomainError::EmptyRaterName)
    }
}

impl From<RaterName> for String {
    fn from(value: RaterName) -> Self {
        value.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_new_trims() {
        let name = RaterName::try_new("  Alex ").unwrap();
        assert_eq!(name.as_str(), "Alex");
    }

    #[test]
    fn test_try_new_blank() {
        assert!(RaterName::try_new("").is_none());
        assert!(RaterName::try_new(" \t ").is_none());
    }

    #[test]
    fn test_try_from_string() {
        assert_eq!(
            RaterName::try_from("   ".to_string()),
            Err(DomainError::EmptyRaterName)
        );
        assert!(RaterName::try_from("Sam".to_string()).is_ok());
    }
}

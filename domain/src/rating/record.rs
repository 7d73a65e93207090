//! Rating record types

use crate::catalog::subject::Subject;
use crate::core::error::DomainError;
use crate::core::rater::RaterName;
use crate::core::score::Score;
use serde::{Deserialize, Serialize};

/// Semantic outcome of a blind comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preference {
    Baseline,
    Experimental,
    Tie,
}

impl Preference {
    pub fn as_str(&self) -> &str {
        match self {
            Preference::Baseline => "baseline",
            Preference::Experimental => "experimental",
            Preference::Tie => "tie",
        }
    }
}

impl std::fmt::Display for Preference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Preference {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "baseline" => Ok(Preference::Baseline),
            "experimental" => Ok(Preference::Experimental),
            "tie" => Ok(Preference::Tie),
            other => Err(DomainError::UnknownPreference(other.to_string())),
        }
    }
}

/// Identity of a rating record: at most one record exists per key
///
/// Components are stored trimmed, so a padded catalog cell and its
/// persisted record always map to the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordKey {
    pub rater_id: String,
    pub model_id: String,
    pub version: Option<String>,
    pub audio_ref: String,
}

impl RecordKey {
    pub fn new(
        rater_id: impl Into<String>,
        model_id: impl Into<String>,
        version: Option<&str>,
        audio_ref: impl Into<String>,
    ) -> Self {
        Self {
            rater_id: rater_id.into().trim().to_string(),
            model_id: model_id.into().trim().to_string(),
            version: version.map(|v| v.trim().to_string()),
            audio_ref: audio_ref.into().trim().to_string(),
        }
    }

    /// Reject keys with a blank component
    pub fn validate(&self) -> Result<(), DomainError> {
        let blank = |s: &str| s.trim().is_empty();
        if blank(&self.rater_id) {
            return Err(DomainError::InvalidKey("rater_id is blank".to_string()));
        }
        if blank(&self.model_id) {
            return Err(DomainError::InvalidKey("model_id is blank".to_string()));
        }
        if blank(&self.audio_ref) {
            return Err(DomainError::InvalidKey(format!(
                "audio_ref is blank for model {}",
                self.model_id
            )));
        }
        if self.version.as_deref().is_some_and(blank) {
            return Err(DomainError::InvalidKey(format!(
                "version is blank for model {}",
                self.model_id
            )));
        }
        Ok(())
    }
}

/// A finalized rating (Entity)
///
/// `consistent` stays `None` when the record carries no preference or the
/// scores needed to judge it were unavailable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingRecord {
    pub rater_id: String,
    pub model_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub audio_ref: String,
    pub transcript: String,
    pub score: Score,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preference: Option<Preference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consistent: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_score: Option<f64>,
    #[serde(default)]
    pub timestamp: String,
}

impl RatingRecord {
    /// A fresh record for `subject`; the timestamp is stamped when persisted
    pub fn new(rater: &RaterName, subject: &Subject, score: Score) -> Self {
        let key = subject.key_for(rater);
        Self {
            rater_id: key.rater_id,
            model_id: key.model_id,
            version: key.version,
            audio_ref: key.audio_ref,
            transcript: subject.transcript.clone(),
            score,
            remarks: None,
            preference: None,
            consistent: None,
            reference_score: subject.reference_score,
            timestamp: String::new(),
        }
    }

    /// Attach a remark; blank remarks are dropped
    pub fn with_remarks(mut self, remarks: Option<String>) -> Self {
        self.remarks = remarks
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());
        self
    }

    pub fn with_preference(mut self, preference: Preference, consistent: Option<bool>) -> Self {
        self.preference = Some(preference);
        self.consistent = consistent;
        self
    }

    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = timestamp.into();
        self
    }

    pub fn key(&self) -> RecordKey {
        RecordKey::new(
            &self.rater_id,
            &self.model_id,
            self.version.as_deref(),
            &self.audio_ref,
        )
    }

    /// Absolute distance to the reference score, if there is one
    pub fn reference_error(&self) -> Option<f64> {
        self.reference_score
            .map(|reference| (f64::from(self.score.value()) - reference).abs())
    }
}

//! Subject entity

use crate::core::rater::RaterName;
use crate::rating::record::RecordKey;
use serde::{Deserialize, Serialize};

/// One audio rendering eligible for rating (Entity)
///
/// `item` aligns renderings of the same utterance across models: the source
/// row for wide catalogs, the first appearance of the transcript for long ones.
/// `model_id` and `audio_ref` are trimmed on construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    pub model_id: String,
    pub version: Option<String>,
    pub audio_ref: String,
    pub transcript: String,
    pub reference_score: Option<f64>,
    pub item: usize,
}

impl Subject {
    pub fn new(
        model_id: impl Into<String>,
        audio_ref: impl Into<String>,
        transcript: impl Into<String>,
        item: usize,
    ) -> Self {
        Self {
            model_id: model_id.into().trim().to_string(),
            version: None,
            audio_ref: audio_ref.into().trim().to_string(),
            transcript: transcript.into(),
            reference_score: None,
            item,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into().trim().to_string());
        self
    }

    pub fn with_reference_score(mut self, score: f64) -> Self {
        self.reference_score = Some(score);
        self
    }

    /// Whether the audio column holds anything other than whitespace
    pub fn has_audio_ref(&self) -> bool {
        !self.audio_ref.trim().is_empty()
    }

    /// Identity of the record `rater` would write for this subject
    pub fn key_for(&self, rater: &RaterName) -> RecordKey {
        RecordKey::new(
            rater.as_str(),
            &self.model_id,
            self.version.as_deref(),
            &self.audio_ref,
        )
    }

    /// `model` or `model@version`
    pub fn label(&self) -> String {
        match &self.version {
            Some(version) => format!("{}@{}", self.model_id, version),
            None => self.model_id.clone(),
        }
    }
}

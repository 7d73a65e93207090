//! Subject set selections

use crate::catalog::pairs::ModelPair;
use serde::{Deserialize, Serialize};

/// What the rater picked in `SelectSubject`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Selection {
    /// Every valid rendering of one model, optionally one version
    Model {
        model_id: String,
        version: Option<String>,
    },
    /// Aligned renderings of two models
    Pair(ModelPair),
    /// Reference samples with expected scores
    Calibration,
}

impl Selection {
    pub fn model(model_id: impl Into<String>) -> Self {
        Selection::Model {
            model_id: model_id.into(),
            version: None,
        }
    }

    pub fn model_version(model_id: impl Into<String>, version: impl Into<String>) -> Self {
        Selection::Model {
            model_id: model_id.into(),
            version: Some(version.into()),
        }
    }

    pub fn pair(baseline: impl Into<String>, experimental: impl Into<String>) -> Self {
        Selection::Pair(ModelPair::new(baseline, experimental))
    }
}

impl std::fmt::Display for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Selection::Model {
                model_id,
                version: Some(version),
            } => write!(f, "model {}@{}", model_id, version),
            Selection::Model { model_id, .. } => write!(f, "model {}", model_id),
            Selection::Pair(pair) => write!(f, "pair {}", pair),
            Selection::Calibration => write!(f, "calibration set"),
        }
    }
}

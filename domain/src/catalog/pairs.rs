//! Comparison set generation
//!
//! Pairs are formed under a "both must exist" policy: an utterance whose
//! rendering is missing or unresolvable on either side is dropped silently
//! instead of being reported as a partial pair.

use super::asset::AssetResolver;
use super::catalog::Catalog;
use super::subject::Subject;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// An unordered pair of models with a baseline/experimental reading
///
/// Equality and hashing ignore the order, so `{A, B}` and `{B, A}` are the
/// same pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelPair {
    pub baseline: String,
    pub experimental: String,
}

impl ModelPair {
    pub fn new(baseline: impl Into<String>, experimental: impl Into<String>) -> Self {
        Self {
            baseline: baseline.into(),
            experimental: experimental.into(),
        }
    }

    pub fn contains(&self, model_id: &str) -> bool {
        self.baseline == model_id || self.experimental == model_id
    }

    pub fn is_self_pair(&self) -> bool {
        self.baseline == self.experimental
    }

    fn ordered(&self) -> (&str, &str) {
        if self.baseline <= self.experimental {
            (&self.baseline, &self.experimental)
        } else {
            (&self.experimental, &self.baseline)
        }
    }
}

impl PartialEq for ModelPair {
    fn eq(&self, other: &Self) -> bool {
        self.ordered() == other.ordered()
    }
}

impl Eq for ModelPair {}

impl Hash for ModelPair {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ordered().hash(state);
    }
}

impl std::fmt::Display for ModelPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} vs {}", self.baseline, self.experimental)
    }
}

/// The two renderings of one utterance
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectPair {
    pub baseline: Subject,
    pub experimental: Subject,
}

impl SubjectPair {
    pub fn item(&self) -> usize {
        self.baseline.item
    }

    pub fn transcript(&self) -> &str {
        &self.baseline.transcript
    }
}

/// Derives comparison sets from a catalog
pub struct PairGenerator;

impl PairGenerator {
    /// Every 2-combination of catalog models, in catalog order
    ///
    /// The earlier model of each pair is read as the baseline.
    pub fn all_model_pairs(catalog: &Catalog) -> Vec<ModelPair> {
        let models = catalog.models();
        let mut pairs = Vec::new();
        for (i, baseline) in models.iter().enumerate() {
            for experimental in &models[i + 1..] {
                let pair = ModelPair::new(baseline.as_str(), experimental.as_str());
                if !pair.is_self_pair() && !pairs.contains(&pair) {
                    pairs.push(pair);
                }
            }
        }
        pairs
    }

    /// Inner join of the two models' valid subjects on the alignment item
    ///
    /// Items are emitted in the baseline's source order. When a model has
    /// several renderings of an item, the first valid one is used.
    pub fn subjects_for_pair(
        catalog: &Catalog,
        baseline: &str,
        experimental: &str,
        assets: &dyn AssetResolver,
    ) -> Vec<SubjectPair> {
        if baseline == experimental {
            return Vec::new();
        }

        let experimental_subjects = catalog.filter_valid_subjects(experimental, None, assets);
        let mut seen_items = Vec::new();
        let mut pairs = Vec::new();

        for base in catalog.filter_valid_subjects(baseline, None, assets) {
            if seen_items.contains(&base.item) {
                continue;
            }
            if let Some(exp) = experimental_subjects.iter().find(|s| s.item == base.item) {
                seen_items.push(base.item);
                pairs.push(SubjectPair {
                    experimental: exp.clone(),
                    baseline: base,
                });
            }
        }
        pairs
    }
}

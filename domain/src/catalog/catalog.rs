//! Catalog aggregate

use super::asset::AssetResolver;
use super::subject::Subject;

/// Read-only snapshot of every evaluable subject (Aggregate)
///
/// Subjects keep source row order; sessions rely on it to resume in the same
/// sequence. A reload produces a new `Catalog` rather than mutating this one.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    models: Vec<String>,
    subjects: Vec<Subject>,
}

impl Catalog {
    /// Build a catalog, deriving the model list from the subjects
    pub fn new(subjects: Vec<Subject>) -> Self {
        let mut models: Vec<String> = Vec::new();
        for subject in &subjects {
            if !models.contains(&subject.model_id) {
                models.push(subject.model_id.clone());
            }
        }
        Self { models, subjects }
    }

    /// Build a catalog with an explicit model list
    ///
    /// Wide tables declare a model per column even when every cell is empty.
    pub fn with_models(models: Vec<String>, subjects: Vec<Subject>) -> Self {
        let mut catalog = Self::new(subjects);
        let mut ordered = models;
        for model in catalog.models.drain(..) {
            if !ordered.contains(&model) {
                ordered.push(model);
            }
        }
        catalog.models = ordered;
        catalog
    }

    /// Distinct model ids in first-seen order
    pub fn models(&self) -> &[String] {
        &self.models
    }

    pub fn has_model(&self, model_id: &str) -> bool {
        self.models.iter().any(|m| m == model_id)
    }

    /// Distinct versions of `model_id` in first-seen order
    pub fn versions(&self, model_id: &str) -> Vec<&str> {
        let mut versions: Vec<&str> = Vec::new();
        for version in self
            .subjects
            .iter()
            .filter(|s| s.model_id == model_id)
            .filter_map(|s| s.version.as_deref())
        {
            if !versions.contains(&version) {
                versions.push(version);
            }
        }
        versions
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    /// Subjects of a model, optionally narrowed to one version, unfiltered
    pub fn subjects_for<'a>(
        &'a self,
        model_id: &'a str,
        version: Option<&'a str>,
    ) -> impl Iterator<Item = &'a Subject> + 'a {
        self.subjects.iter().filter(move |s| {
            s.model_id == model_id && (version.is_none() || s.version.as_deref() == version)
        })
    }

    /// Subjects whose audio reference is non-blank and resolves to an asset
    pub fn filter_valid_subjects(
        &self,
        model_id: &str,
        version: Option<&str>,
        assets: &dyn AssetResolver,
    ) -> Vec<Subject> {
        self.subjects_for(model_id, version)
            .filter(|s| assets.is_valid(s))
            .cloned()
            .collect()
    }

    /// Valid subjects that carry an expected score
    pub fn calibration_subjects(&self, assets: &dyn AssetResolver) -> Vec<Subject> {
        self.subjects
            .iter()
            .filter(|s| s.reference_score.is_some() && assets.is_valid(s))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::asset::KnownAssets;

    fn sample_catalog() -> Catalog {
        Catalog::new(vec![
            Subject::new("tts_v1", "s1.wav", "one", 0),
            Subject::new("tts_v2", "s1.wav", "one", 0),
            Subject::new("tts_v1", "  ", "two", 1),
            Subject::new("tts_v2", "s2.wav", "two", 1),
            Subject::new("tts_v1", "s3.wav", "three", 2),
            Subject::new("tts_v2", "s3.wav", "three", 2).with_version("r2"),
        ])
    }

    #[test]
    fn test_models_first_seen_order() {
        let catalog = sample_catalog();
        assert_eq!(catalog.models(), &["tts_v1", "tts_v2"]);
        assert!(catalog.has_model("tts_v2"));
        assert!(!catalog.has_model("tts_v3"));
    }

    #[test]
    fn test_with_models_keeps_declared_order() {
        let catalog = Catalog::with_models(
            vec!["empty".to_string(), "tts_v2".to_string()],
            vec![
                Subject::new("tts_v1", "a.wav", "t", 0),
                Subject::new("tts_v2", "b.wav", "t", 0),
            ],
        );
        assert_eq!(catalog.models(), &["empty", "tts_v2", "tts_v1"]);
    }

    #[test]
    fn test_filter_valid_subjects_preserves_order() {
        let catalog = sample_catalog();
        let assets = KnownAssets::of(&["tts_v1/s1.wav", "tts_v1/s3.wav", "tts_v2/s2.wav"]);

        let valid = catalog.filter_valid_subjects("tts_v1", None, &assets);
        let refs: Vec<_> = valid.iter().map(|s| s.audio_ref.as_str()).collect();
        assert_eq!(refs, vec!["s1.wav", "s3.wav"]);
    }

    #[test]
    fn test_filter_valid_subjects_excludes_missing_assets() {
        let catalog = sample_catalog();
        let assets = KnownAssets::of(&["tts_v2/s2.wav"]);

        let valid = catalog.filter_valid_subjects("tts_v2", None, &assets);
        assert_eq!(valid.len(), 1);
        assert_eq!(valid[0].audio_ref, "s2.wav");
    }

    #[test]
    fn test_filter_by_version() {
        let catalog = sample_catalog();
        let assets = KnownAssets::of(&["tts_v2/r2/s3.wav", "tts_v2/s1.wav"]);

        let valid = catalog.filter_valid_subjects("tts_v2", Some("r2"), &assets);
        assert_eq!(valid.len(), 1);
        assert_eq!(valid[0].version.as_deref(), Some("r2"));
        assert_eq!(catalog.versions("tts_v2"), vec!["r2"]);
        assert!(catalog.versions("tts_v1").is_empty());
    }

    #[test]
    fn test_calibration_subjects() {
        let catalog = Catalog::new(vec![
            Subject::new("test", "sample_0.wav", "a", 0).with_reference_score(0.0),
            Subject::new("test", "sample_1.wav", "b", 1),
            Subject::new("test", "sample_2.wav", "c", 2).with_reference_score(2.0),
        ]);
        let assets = KnownAssets::of(&["test/sample_0.wav", "test/sample_1.wav"]);

        let subjects = catalog.calibration_subjects(&assets);
        assert_eq!(subjects.len(), 1);
        assert_eq!(subjects[0].audio_ref, "sample_0.wav");
    }
}

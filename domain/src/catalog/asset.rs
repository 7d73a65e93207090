//! Asset resolution trait

use super::subject::Subject;
use std::path::PathBuf;

/// Resolves audio references to playable assets
///
/// The engine only needs path-join and existence semantics; decoding and
/// playback belong to the presentation layer. Implementations live in the
/// infrastructure layer.
pub trait AssetResolver: Send + Sync {
    /// Where the asset for `(model_id, version, audio_ref)` would live
    fn locate(&self, model_id: &str, version: Option<&str>, audio_ref: &str) -> PathBuf;

    /// Whether the asset exists on the backend
    fn exists(&self, model_id: &str, version: Option<&str>, audio_ref: &str) -> bool;

    /// A subject is valid when its reference is non-blank and resolves
    fn is_valid(&self, subject: &Subject) -> bool {
        subject.has_audio_ref()
            && self.exists(
                &subject.model_id,
                subject.version.as_deref(),
                subject.audio_ref.trim(),
            )
    }

    fn locate_subject(&self, subject: &Subject) -> PathBuf {
        self.locate(
            &subject.model_id,
            subject.version.as_deref(),
            subject.audio_ref.trim(),
        )
    }
}

/// Resolver backed by a fixed set of `model/audio_ref` paths
#[cfg(test)]
pub(crate) struct KnownAssets(pub std::collections::HashSet<String>);

#[cfg(test)]
impl KnownAssets {
    pub(crate) fn of(paths: &[&str]) -> Self {
        Self(paths.iter().map(|p| p.to_string()).collect())
    }
}

#[cfg(test)]
impl AssetResolver for KnownAssets {
    fn locate(&self, model_id: &str, version: Option<&str>, audio_ref: &str) -> PathBuf {
        let mut path = PathBuf::from(model_id);
        if let Some(version) = version {
            path.push(version);
        }
        path.join(audio_ref)
    }

    fn exists(&self, model_id: &str, version: Option<&str>, audio_ref: &str) -> bool {
        let path = self.locate(model_id, version, audio_ref);
        self.0.contains(&path.to_string_lossy().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_requires_existing_asset() {
        let assets = KnownAssets::of(&["tts_v1/s1.wav"]);
        assert!(assets.is_valid(&Subject::new("tts_v1", "s1.wav", "t", 0)));
        assert!(!assets.is_valid(&Subject::new("tts_v1", "s2.wav", "t", 1)));
        assert!(!assets.is_valid(&Subject::new("tts_v1", "  ", "t", 2)));
    }

    #[test]
    fn test_is_valid_trims_reference() {
        let assets = KnownAssets::of(&["tts_v1/s1.wav"]);
        assert!(assets.is_valid(&Subject::new("tts_v1", " s1.wav ", "t", 0)));
    }
}

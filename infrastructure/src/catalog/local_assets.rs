//! Local filesystem asset resolver

use std::path::{Component, Path, PathBuf};
use ttseval_domain::AssetResolver;

/// Resolves `(model, version?, audio_ref)` under a local audio root
///
/// Layout: `<root>/<model_id>[/<version>]/<audio_ref>`. References that
/// would escape the root (absolute paths, `..`) never exist.
pub struct LocalAssetResolver {
    root: PathBuf,
}

impl LocalAssetResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

fn is_contained(part: &str) -> bool {
    Path::new(part)
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

impl AssetResolver for LocalAssetResolver {
    fn locate(&self, model_id: &str, version: Option<&str>, audio_ref: &str) -> PathBuf {
        let mut path = self.root.join(model_id);
        if let Some(version) = version {
            path.push(version);
        }
        path.join(audio_ref)
    }

    fn exists(&self, model_id: &str, version: Option<&str>, audio_ref: &str) -> bool {
        let parts = [Some(model_id), version, Some(audio_ref)];
        if !parts.into_iter().flatten().all(is_contained) {
            return false;
        }
        self.locate(model_id, version, audio_ref).is_file()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use ttseval_domain::Subject;

    fn root_with(files: &[&str]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for file in files {
            let path = dir.path().join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, b"RIFF").unwrap();
        }
        dir
    }

    #[test]
    fn test_locate_with_and_without_version() {
        let resolver = LocalAssetResolver::new("/audio");
        assert_eq!(
            resolver.locate("tts_v1", None, "s1.wav"),
            PathBuf::from("/audio/tts_v1/s1.wav")
        );
        assert_eq!(
            resolver.locate("tts_v1", Some("r2"), "s1.wav"),
            PathBuf::from("/audio/tts_v1/r2/s1.wav")
        );
    }

    #[test]
    fn test_exists_checks_files_only() {
        let dir = root_with(&["tts_v1/s1.wav", "tts_v1/r2/s2.wav"]);
        let resolver = LocalAssetResolver::new(dir.path());

        assert!(resolver.exists("tts_v1", None, "s1.wav"));
        assert!(resolver.exists("tts_v1", Some("r2"), "s2.wav"));
        assert!(!resolver.exists("tts_v1", None, "missing.wav"));
        // a directory is not an asset
        assert!(!resolver.exists("tts_v1", None, "r2"));
    }

    #[test]
    fn test_escaping_references_never_exist() {
        let dir = root_with(&["tts_v1/s1.wav", "secret.wav"]);
        let resolver = LocalAssetResolver::new(dir.path().join("tts_v1"));

        assert!(!resolver.exists("..", None, "secret.wav"));
        assert!(!resolver.exists("tts_v1", None, "../secret.wav"));
        assert!(!resolver.exists("tts_v1", None, "/etc/passwd"));
    }

    #[test]
    fn test_subject_validity_trims_reference() {
        let dir = root_with(&["tts_v1/s1.wav"]);
        let resolver = LocalAssetResolver::new(dir.path());

        assert!(resolver.is_valid(&Subject::new("tts_v1", " s1.wav ", "hello", 0)));
        assert!(!resolver.is_valid(&Subject::new("tts_v1", "  ", "hello", 0)));
    }
}

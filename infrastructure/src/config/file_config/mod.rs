//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod calibration;
mod catalog;
mod output;
mod repl;
mod session;
mod store;

pub use calibration::FileCalibrationConfig;
pub use catalog::FileCatalogConfig;
pub use output::FileOutputConfig;
pub use repl::FileReplConfig;
pub use session::FileSessionConfig;
pub use store::FileStoreConfig;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq)]
pub enum ConfigValidationError {
    #[error("catalog.path cannot be empty")]
    EmptyCatalogPath,

    #[error("store.lock_timeout_ms cannot be 0")]
    InvalidLockTimeout,

    #[error("store.stale_lock_ms ({stale_ms}) must exceed store.lock_timeout_ms ({timeout_ms})")]
    StaleLockTooShort { stale_ms: u64, timeout_ms: u64 },

    #[error("calibration.tolerance must be non-negative, got {0}")]
    InvalidTolerance(f64),

    #[error("calibration.pass_threshold must be within 0-100, got {0}")]
    InvalidPassThreshold(f64),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Metadata catalog and audio location
    pub catalog: FileCatalogConfig,
    /// Result store location and locking
    pub store: FileStoreConfig,
    /// Workflow selection
    pub session: FileSessionConfig,
    /// Calibration quiz thresholds
    pub calibration: FileCalibrationConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// REPL settings
    pub repl: FileReplConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning every problem found
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut issues = Vec::new();

        if self.catalog.path.as_os_str().is_empty() {
            issues.push(ConfigValidationError::EmptyCatalogPath);
        }

        if self.store.lock_timeout_ms == 0 {
            issues.push(ConfigValidationError::InvalidLockTimeout);
        } else if self.store.stale_lock_ms <= self.store.lock_timeout_ms {
            issues.push(ConfigValidationError::StaleLockTooShort {
                stale_ms: self.store.stale_lock_ms,
                timeout_ms: self.store.lock_timeout_ms,
            });
        }

        let tolerance = self.calibration.tolerance;
        if !tolerance.is_finite() || tolerance < 0.0 {
            issues.push(ConfigValidationError::InvalidTolerance(tolerance));
        }
        let threshold = self.calibration.pass_threshold;
        if !(0.0..=100.0).contains(&threshold) {
            issues.push(ConfigValidationError::InvalidPassThreshold(threshold));
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use ttseval_domain::WorkflowVariant;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[catalog]
path = "data/list.csv"
audio_dir = "data/audios"

[store]
dir = "results"
lock_timeout_ms = 2000
stale_lock_ms = 60000

[session]
variant = "blind"

[calibration]
tolerance = 0.5
pass_threshold = 90.0

[output]
color = false

[repl]
history_file = "~/.local/share/ttseval/history.txt"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.catalog.path, PathBuf::from("data/list.csv"));
        assert_eq!(config.catalog.audio_dir, PathBuf::from("data/audios"));
        assert_eq!(config.store.dir, PathBuf::from("results"));
        assert_eq!(config.store.lock_timeout_ms, 2000);
        assert_eq!(config.session.variant, WorkflowVariant::Blind);
        assert_eq!(config.calibration.tolerance, 0.5);
        assert!(!config.output.color);
        assert!(config.repl.history_file.is_some());
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[session]
variant = "calibration"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.session.variant, WorkflowVariant::Calibration);
        // Defaults should apply
        assert_eq!(config.catalog.path, PathBuf::from("app_input/csv/list.csv"));
        assert_eq!(config.calibration.pass_threshold, 80.0);
        assert!(config.output.color);
    }

    #[test]
    fn test_validate_valid_config() {
        let config = FileConfig::default();
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_validate_reports_every_issue() {
        let mut config = FileConfig::default();
        config.catalog.path = PathBuf::new();
        config.store.lock_timeout_ms = 0;
        config.calibration.tolerance = -1.0;
        config.calibration.pass_threshold = 120.0;

        let issues = config.validate();
        assert_eq!(
            issues,
            vec![
                ConfigValidationError::EmptyCatalogPath,
                ConfigValidationError::InvalidLockTimeout,
                ConfigValidationError::InvalidTolerance(-1.0),
                ConfigValidationError::InvalidPassThreshold(120.0),
            ]
        );
    }

    #[test]
    fn test_validate_stale_lock_must_exceed_timeout() {
        let mut config = FileConfig::default();
        config.store.lock_timeout_ms = 5000;
        config.store.stale_lock_ms = 5000;
        assert!(matches!(
            config.validate().as_slice(),
            [ConfigValidationError::StaleLockTooShort { .. }]
        ));
    }
}

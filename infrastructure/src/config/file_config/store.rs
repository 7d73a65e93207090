//! Result store configuration from TOML (`[store]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use ttseval_domain::WorkflowVariant;

/// Raw store configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStoreConfig {
    /// Directory holding one JSONL file per workflow variant
    pub dir: PathBuf,
    /// Explicit store file, overriding the per-variant default
    pub file: Option<PathBuf>,
    /// How long a writer waits for the lock before giving up
    pub lock_timeout_ms: u64,
    /// Age after which a leftover lock file is considered abandoned
    pub stale_lock_ms: u64,
}

impl Default for FileStoreConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("app_output"),
            file: None,
            lock_timeout_ms: 5_000,
            stale_lock_ms: 30_000,
        }
    }
}

impl FileStoreConfig {
    /// Store file used by `variant`
    pub fn path_for(&self, variant: WorkflowVariant) -> PathBuf {
        match &self.file {
            Some(file) => file.clone(),
            None => self.dir.join(variant.default_store_file()),
        }
    }

    pub fn lock_timeout(&self) -> Duration {
        Duration::from_millis(self.lock_timeout_ms)
    }

    pub fn stale_after(&self) -> Duration {
        Duration::from_millis(self.stale_lock_ms)
    }
}

//! Catalog configuration from TOML (`[catalog]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw catalog configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCatalogConfig {
    /// CSV table listing every subject
    pub path: PathBuf,
    /// Root directory of `<model>[/<version>]/<audio_ref>` files
    pub audio_dir: PathBuf,
}

impl Default for FileCatalogConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("app_input/csv/list.csv"),
            audio_dir: PathBuf::from("app_input/audios"),
        }
    }
}

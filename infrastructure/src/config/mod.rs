//! Configuration file loading for ttseval
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./ttseval.toml` or `./.ttseval.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/ttseval/config.toml`
//! 4. Fallback: `~/.config/ttseval/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileCalibrationConfig, FileCatalogConfig, FileConfig,
    FileOutputConfig, FileReplConfig, FileSessionConfig, FileStoreConfig,
};
pub use loader::ConfigLoader;

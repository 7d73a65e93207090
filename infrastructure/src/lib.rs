//! Infrastructure layer for ttseval
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod catalog;
pub mod config;
pub mod random;
pub mod store;

// Re-export commonly used types
pub use catalog::{CatalogLayout, CsvCatalogSource, LocalAssetResolver};
pub use config::{
    ConfigLoader, ConfigValidationError, FileCalibrationConfig, FileCatalogConfig, FileConfig,
    FileOutputConfig, FileReplConfig, FileSessionConfig, FileStoreConfig,
};
pub use random::RandomSidePicker;
pub use store::JsonlResultStore;

//! Catalog source port
//!
//! Defines the interface for loading the metadata catalog. The catalog is
//! read once per session; a reload yields a fresh snapshot.

use std::path::PathBuf;
use thiserror::Error;
use ttseval_domain::Catalog;

/// Errors that can occur while loading a catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Catalog not found: {}", .0.display())]
    MissingSource(PathBuf),

    #[error("Catalog {} is missing required column '{column}'", path.display())]
    MissingColumn { path: PathBuf, column: String },

    #[error("Catalog {} line {line}: {message}", path.display())]
    Malformed {
        path: PathBuf,
        line: u64,
        message: String,
    },

    #[error("Failed to read catalog {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Loads the read-only table of evaluable subjects
pub trait CatalogSource: Send + Sync {
    fn load(&self) -> Result<Catalog, CatalogError>;
}

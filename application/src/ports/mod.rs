//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.
//! Asset resolution is a domain trait ([`AssetResolver`]) re-exported here so
//! adapters find every seam in one place.

pub mod catalog_source;
pub mod result_store;
pub mod side_picker;

pub use ttseval_domain::AssetResolver;

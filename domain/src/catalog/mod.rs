//! Metadata catalog domain.
//!
//! - [`subject::Subject`]: one rendering of an utterance by one model
//! - [`catalog::Catalog`]: immutable snapshot of every subject
//! - [`asset::AssetResolver`]: trait for audio existence checks
//! - [`pairs::PairGenerator`]: model pairs and joined subject pairs

pub mod asset;
#[allow(clippy::module_inception)]
pub mod catalog;
pub mod pairs;
pub mod subject;

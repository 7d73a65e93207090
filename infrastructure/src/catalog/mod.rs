//! Catalog and audio asset adapters

mod csv_source;
mod local_assets;

pub use csv_source::{CatalogLayout, CsvCatalogSource};
pub use local_assets::LocalAssetResolver;

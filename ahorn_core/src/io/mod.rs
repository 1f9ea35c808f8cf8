//! Loading datasheets and assembling the catalog.
//!
//! # Example
//!
//! ```no_run
//! use ahorn_core::io::catalog::Catalog;
//! use std::path::Path;
//!
//! let catalog = Catalog::load(Path::new("datasets.json"))
//!     .expect("Failed to load catalog");
//! println!("Loaded {} datasets", catalog.len());
//! ```

pub mod catalog;
pub mod loaders;


pub use catalog::{
    global_catalog, global_catalog_or_load, init_global_catalog, Catalog, DatasetIndex, IndexEntry,
    RelatedDataset,
};
pub use loaders::{CatalogLoadResult, CatalogLoader, CatalogSourceType};

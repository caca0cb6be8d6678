//! Feature encoding: raw form input to a sparse one-hot record.

pub mod catalog;
pub mod encoder;

pub use catalog::{CatalogCoverage, CategoricalField, NumericFeature, catalog_columns, check_coverage};
pub use encoder::{SparseFeatureRecord, encode};

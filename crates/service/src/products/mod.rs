//! Product catalog helpers used by data-prep tooling, outside the lookup service.

pub mod filter;
pub mod convert;

pub use filter::{filter_by_category, ProductCatalog};

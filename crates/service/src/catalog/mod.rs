//! Location catalog: parse the source, index it by beer, publish snapshots.

pub mod loader;
pub mod index;
pub mod store;

pub use index::LookupIndex;
pub use store::{CatalogSource, CatalogStore, ReloadSummary};

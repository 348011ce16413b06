//! Catalog loading, the beer → locations lookup index and product catalog tooling.
//! - `catalog` builds and serves the immutable lookup snapshot.
//! - `products` holds the data-prep helpers used outside the service process.

pub mod errors;
pub mod catalog;
pub mod products;
#[cfg(test)]
pub mod test_support;

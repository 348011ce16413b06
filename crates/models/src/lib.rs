//! Record types shared by the lookup service and the catalog tooling.

pub mod errors;
pub mod location;
pub mod product;

use std::collections::HashMap;

use models::location::{Catalog, Location};
use tracing::debug;

use crate::errors::{LoadError, LookupError};

/// Immutable beer → locations index over a loaded catalog.
///
/// Buckets hold catalog positions, so a location listed under several beers
/// is stored once. A location that lists the same beer twice appears twice
/// in that beer's bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupIndex {
    tag_field: String,
    locations: Catalog,
    buckets: HashMap<String, Vec<usize>>,
}

impl LookupIndex {
    /// Index `catalog` by the identifiers listed under `tag_field`.
    ///
    /// Records without the field, or with an empty list, land in no bucket.
    /// A tag field that is not a list of strings fails the whole build.
    pub fn build(catalog: Catalog, tag_field: &str) -> Result<Self, LoadError> {
        let mut buckets: HashMap<String, Vec<usize>> = HashMap::new();
        for (position, location) in catalog.iter().enumerate() {
            let tags = location
                .tags(tag_field)
                .map_err(|e| LoadError::Shape { position, reason: e.to_string() })?;
            for tag in tags {
                match buckets.get_mut(tag) {
                    Some(bucket) => bucket.push(position),
                    None => {
                        buckets.insert(tag.to_owned(), vec![position]);
                    }
                }
            }
        }
        debug!(
            tag_field,
            locations = catalog.len(),
            tags = buckets.len(),
            "built lookup index"
        );
        Ok(Self { tag_field: tag_field.to_owned(), locations: catalog, buckets })
    }

    /// The whole catalog, in source order.
    pub fn all(&self) -> &[Location] { &self.locations }

    /// Locations listing `key`, in catalog order, once per occurrence.
    pub fn by_tag(&self, key: &str) -> Result<Vec<&Location>, LookupError> {
        if key.is_empty() {
            return Err(LookupError::MissingKey);
        }
        let bucket = self
            .buckets
            .get(key)
            .ok_or_else(|| LookupError::NotFound(key.to_owned()))?;
        Ok(bucket.iter().map(|&position| &self.locations[position]).collect())
    }

    pub fn tag_field(&self) -> &str { &self.tag_field }

    pub fn len(&self) -> usize { self.locations.len() }

    pub fn is_empty(&self) -> bool { self.locations.is_empty() }

    /// Number of distinct identifiers.
    pub fn tag_count(&self) -> usize { self.buckets.len() }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.buckets.keys().map(String::as_str)
    }
}

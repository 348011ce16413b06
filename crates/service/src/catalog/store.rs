use std::{path::PathBuf, sync::Arc};

use arc_swap::ArcSwap;
use serde::Serialize;
use tracing::{info, warn};

use crate::catalog::{index::LookupIndex, loader};
use crate::errors::LoadError;

/// Where a catalog comes from and which field to index it by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSource {
    pub path: PathBuf,
    pub tag_field: String,
}

impl CatalogSource {
    pub fn new(path: impl Into<PathBuf>, tag_field: impl Into<String>) -> Self {
        Self { path: path.into(), tag_field: tag_field.into() }
    }

    /// Read, parse and index the source in one go.
    pub fn load_index(&self) -> Result<LookupIndex, LoadError> {
        let catalog = loader::load_path(&self.path)?;
        LookupIndex::build(catalog, &self.tag_field)
    }
}

/// Counts describing a freshly published snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReloadSummary {
    pub locations: usize,
    pub tags: usize,
}

impl From<&LookupIndex> for ReloadSummary {
    fn from(index: &LookupIndex) -> Self {
        Self { locations: index.len(), tags: index.tag_count() }
    }
}

/// Holder of the current lookup snapshot.
///
/// Readers grab an `Arc` to the snapshot and keep it for the whole request.
/// A reload builds a complete index first and only then swaps it in; on
/// failure the previous snapshot stays published.
pub struct CatalogStore {
    source: CatalogSource,
    current: ArcSwap<LookupIndex>,
}

impl CatalogStore {
    /// Load the source once and publish the first snapshot.
    pub fn open(source: CatalogSource) -> Result<Arc<Self>, LoadError> {
        let index = source.load_index()?;
        info!(
            event = "catalog_loaded",
            path = %source.path.display(),
            tag_field = %source.tag_field,
            locations = index.len(),
            tags = index.tag_count(),
            "catalog loaded"
        );
        Ok(Self::with_index(source, index))
    }

    /// Publish an already built index, e.g. one assembled in memory.
    pub fn with_index(source: CatalogSource, index: LookupIndex) -> Arc<Self> {
        Arc::new(Self { source, current: ArcSwap::from_pointee(index) })
    }

    pub fn source(&self) -> &CatalogSource { &self.source }

    pub fn snapshot(&self) -> Arc<LookupIndex> { self.current.load_full() }

    /// Rebuild from the source and swap the new snapshot in.
    pub fn reload(&self) -> Result<ReloadSummary, LoadError> {
        let index = match self.source.load_index() {
            Ok(index) => index,
            Err(e) => {
                warn!(event = "catalog_reload_failed", path = %self.source.path.display(), error = %e, "keeping previous catalog");
                return Err(e);
            }
        };
        let summary = ReloadSummary::from(&index);
        self.current.store(Arc::new(index));
        info!(
            event = "catalog_reloaded",
            path = %self.source.path.display(),
            locations = summary.locations,
            tags = summary.tags,
            "catalog reloaded"
        );
        Ok(summary)
    }
}

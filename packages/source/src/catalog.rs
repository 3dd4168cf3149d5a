//! Process-lifetime memoization of listing loads.
//!
//! Loading the unified listings table is the expensive step of a
//! recomputation pass, so the catalog caches each load keyed by the
//! resolved file path. Invalidation is "never" within a process run; a
//! fresh process picks up file changes.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rental_map_source_models::CitySource;

use crate::loader::{self, LoadedListings};
use crate::SourceError;

/// A cache of cleaned listing sets keyed by resolved source path.
///
/// Owned by the session; constructing a new catalog (e.g. in tests)
/// yields a fully isolated cache.
#[derive(Debug)]
pub struct Catalog {
    data_dir: PathBuf,
    listings: BTreeMap<PathBuf, Arc<LoadedListings>>,
}

impl Catalog {
    /// Creates a catalog rooted at the given data directory.
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            listings: BTreeMap::new(),
        }
    }

    /// Returns the directory this catalog resolves file names against.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Returns the cleaned listings for a city source, loading the
    /// backing file on first use and reusing the cached result after.
    ///
    /// Note that sources sharing one unified listings file also share
    /// one cache entry, so the file is read once per process.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::DataUnavailable`] when the file is
    /// missing, or a parse error when it cannot be read.
    pub fn listings_for(&mut self, source: &CitySource) -> Result<Arc<LoadedListings>, SourceError> {
        let path = self.data_dir.join(&source.listings_csv);

        if let Some(cached) = self.listings.get(&path) {
            log::debug!("Catalog hit for {}", path.display());
            return Ok(Arc::clone(cached));
        }

        let loaded = Arc::new(loader::load_listings(&path)?);
        self.listings.insert(path, Arc::clone(&loaded));
        Ok(loaded)
    }

    /// Number of distinct files loaded so far. Exposed for tests and
    /// diagnostics.
    #[must_use]
    pub fn loaded_file_count(&self) -> usize {
        self.listings.len()
    }
}

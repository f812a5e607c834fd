use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use once_cell::sync::Lazy;
use tracing::debug;

use crate::ClientResult;
use crate::config::DatasetConfig;
use crate::dataset::Dataset;
use crate::dataset::source::{DataSource, load_dataset};

static GLOBAL_CACHE: Lazy<DatasetCache> = Lazy::new(DatasetCache::new);

/// Process-wide cache used by the command layer.
pub fn global() -> &'static DatasetCache {
    &GLOBAL_CACHE
}

/// Identity of a loaded dataset: the canonical source plus its delimiter.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct DatasetKey {
    pub source: DataSource,
    pub delimiter: u8,
}

impl DatasetKey {
    pub fn for_config(config: &DatasetConfig) -> Self {
        Self {
            source: config.source.identity(),
            delimiter: config.delimiter,
        }
    }
}

#[derive(Debug)]
struct CachedDataset {
    key: DatasetKey,
    dataset: Arc<Dataset>,
}

/// Single-slot read-through cache. A load happens on first access for a key
/// and again only on `reload`; `invalidate` empties the slot.
#[derive(Debug, Default)]
pub struct DatasetCache {
    slot: Mutex<Option<CachedDataset>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_load(&self, config: &DatasetConfig) -> ClientResult<Arc<Dataset>> {
        self.get_or_load_with(DatasetKey::for_config(config), || load_dataset(config))
    }

    pub fn get_or_load_with<F>(&self, key: DatasetKey, load: F) -> ClientResult<Arc<Dataset>>
    where
        F: FnOnce() -> ClientResult<Dataset>,
    {
        let mut slot = self.lock();
        if let Some(cached) = slot.as_ref()
            && cached.key == key
        {
            debug!(source = %cached.dataset.source_label(), "dataset cache hit");
            return Ok(Arc::clone(&cached.dataset));
        }

        let dataset = Arc::new(load()?);
        debug!(
            source = %dataset.source_label(),
            rows = dataset.len(),
            "dataset loaded into cache"
        );
        *slot = Some(CachedDataset {
            key,
            dataset: Arc::clone(&dataset),
        });
        Ok(dataset)
    }

    pub fn reload(&self, config: &DatasetConfig) -> ClientResult<Arc<Dataset>> {
        self.invalidate();
        self.get_or_load(config)
    }

    pub fn invalidate(&self) {
        let mut slot = self.lock();
        if slot.take().is_some() {
            debug!("dataset cache invalidated");
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.lock().is_some()
    }

    // No writer can leave the slot half-updated, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, Option<CachedDataset>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

use super::loader::load_file;
use super::model::Dataset;
use crate::config::{ColumnMapping, DashboardConfig};
use crate::error::Result;

/// Reads the dataset on first use and hands out the same `Arc` afterwards.
///
/// The slot is guarded by a mutex so concurrent first callers trigger a single
/// read; the losers block until the winner has filled the slot.
#[derive(Debug)]
pub struct DatasetLoader {
    path: PathBuf,
    columns: ColumnMapping,
    slot: Mutex<Option<Arc<Dataset>>>,
}

impl DatasetLoader {
    pub fn new(path: impl Into<PathBuf>, columns: ColumnMapping) -> Self {
        Self {
            path: path.into(),
            columns,
            slot: Mutex::new(None),
        }
    }

    pub fn from_config(config: &DashboardConfig) -> Self {
        Self::new(config.data_path.clone(), config.columns.clone())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Return the cached dataset, reading storage only if nothing is cached.
    /// A failed read leaves the slot empty.
    pub fn load(&self) -> Result<Arc<Dataset>> {
        let mut slot = self.lock();
        if let Some(ds) = slot.as_ref() {
            return Ok(Arc::clone(ds));
        }
        let ds = Arc::new(load_file(&self.path, &self.columns)?);
        *slot = Some(Arc::clone(&ds));
        Ok(ds)
    }

    pub fn is_loaded(&self) -> bool {
        self.lock().is_some()
    }

    /// Drop the cached dataset; the next [`load`](Self::load) reads storage again.
    pub fn reset(&self) {
        *self.lock() = None;
    }

    /// Re-read storage now. On failure the previous dataset has already been
    /// dropped.
    pub fn reload(&self) -> Result<Arc<Dataset>> {
        self.reset();
        self.load()
    }

    // Nothing inside the critical section can leave the slot half-written.
    fn lock(&self) -> MutexGuard<'_, Option<Arc<Dataset>>> {
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

static SHARED: OnceLock<DatasetLoader> = OnceLock::new();

/// The process-wide loader. The first call fixes its configuration; later
/// calls ignore `config` and return the same instance.
pub fn shared(config: &DashboardConfig) -> &'static DatasetLoader {
    SHARED.get_or_init(|| DatasetLoader::from_config(config))
}

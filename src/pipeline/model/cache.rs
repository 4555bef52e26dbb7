//! Model loaders: fresh reads per request, or a read-through cache

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::SystemTime;

use super::{load_model, SequentialModel};
use crate::pipeline::error::ModelError;

/// Source of a compiled model for one prediction request
pub trait ModelLoader {
    fn load(&self, path: &Path) -> Result<Arc<SequentialModel>, ModelError>;
}

/// Reads the artifact from disk on every request
#[derive(Debug, Default, Clone, Copy)]
pub struct FreshLoader;

impl ModelLoader for FreshLoader {
    fn load(&self, path: &Path) -> Result<Arc<SequentialModel>, ModelError> {
        Ok(Arc::new(load_model(path)?))
    }
}

#[derive(Debug)]
struct CacheEntry {
    modified: SystemTime,
    len: u64,
    model: Arc<SequentialModel>,
}

/// Keeps the last compiled model per artifact path.
///
/// Every request still stats the file; a changed modification time or size
/// forces a reload, so the newest artifact on disk is always the one used.
#[derive(Debug, Default)]
pub struct CachedLoader {
    entries: Mutex<HashMap<PathBuf, CacheEntry>>,
}

impl CachedLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of artifacts currently cached
    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ModelLoader for CachedLoader {
    fn load(&self, path: &Path) -> Result<Arc<SequentialModel>, ModelError> {
        let io_error = |source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        };
        let metadata = std::fs::metadata(path).map_err(io_error)?;
        let modified = metadata.modified().map_err(io_error)?;
        let len = metadata.len();

        // A poisoned lock only means another request panicked mid-insert
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(entry) = entries.get(path) {
            if entry.modified == modified && entry.len == len {
                return Ok(Arc::clone(&entry.model));
            }
        }

        let model = Arc::new(load_model(path)?);
        entries.insert(
            path.to_path_buf(),
            CacheEntry {
                modified,
                len,
                model: Arc::clone(&model),
            },
        );
        Ok(model)
    }
}

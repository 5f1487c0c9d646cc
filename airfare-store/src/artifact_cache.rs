use airfare_core::FareResult;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Load-once cache of deserialized artifacts, keyed by path.
///
/// Entries are never evicted: the artifact set is small and fixed for the
/// life of the process. Failed loads are not cached, so the next call retries.
pub struct ArtifactCache<T> {
    entries: RwLock<HashMap<PathBuf, Arc<T>>>,
}

impl<T> Default for ArtifactCache<T> {
    fn default() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl<T> ArtifactCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_load<F>(&self, path: &Path, load: F) -> FareResult<Arc<T>>
    where
        F: FnOnce(&Path) -> FareResult<T>,
    {
        // 1. Fast path: already loaded
        if let Some(hit) = self.read_entry(path) {
            return Ok(hit);
        }

        // 2. Load outside the lock; a slow disk read must not block readers
        tracing::debug!("Artifact cache miss for {}", path.display());
        let loaded = Arc::new(load(path)?);

        // 3. Populate. If another caller won the race keep theirs
        let mut entries = self.entries.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(entries.entry(path.to_path_buf()).or_insert(loaded).clone())
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read_entry(&self, path: &Path) -> Option<Arc<T>> {
        let entries = self.entries.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.get(path).cloned()
    }
}

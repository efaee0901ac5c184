//! Storage backends: string key/value slots written whole.

use parking_lot::RwLock;
use sarraf_common::{Result, SarrafError};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A key/value backend holding serialized collections.
///
/// A single `write` call covers every key it is given; backends must
/// apply the batch as one unit so a multi-collection commit cannot be
/// observed half-written.
pub trait StorageBackend: Send + Sync {
    /// Read the value stored under a key, if any.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Write a batch of keys as one unit.
    fn write(&self, entries: &[(&'static str, String)]) -> Result<()>;

    /// Remove a key.
    fn remove(&self, key: &str) -> Result<()>;

    /// Remove everything.
    fn clear(&self) -> Result<()>;
}

/// In-memory backend. State dies with the process; used by tests and the
/// simulator.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    slots: RwLock<HashMap<String, String>>,
}

impl MemoryBackend {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.read().get(key).cloned())
    }

    fn write(&self, entries: &[(&'static str, String)]) -> Result<()> {
        let mut slots = self.slots.write();
        for (key, value) in entries {
            slots.insert((*key).to_string(), value.clone());
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.slots.write().remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.slots.write().clear();
        Ok(())
    }
}

/// File-backed backend persisting all slots as one JSON document.
///
/// Every write rewrites the document through a temp file and rename, so
/// the file on disk always holds a complete batch.
pub struct JsonFileBackend {
    path: PathBuf,
    slots: RwLock<HashMap<String, String>>,
}

impl JsonFileBackend {
    /// Open the backend, loading existing data if the file is present.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let slots = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents)
                .map_err(|e| SarrafError::Storage(format!("corrupt store file: {e}")))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(SarrafError::Storage(e.to_string())),
        };

        debug!(path = %path.display(), slots = slots.len(), "Opened store file");

        Ok(Self {
            path,
            slots: RwLock::new(slots),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, slots: &HashMap<String, String>) -> Result<()> {
        let contents = serde_json::to_string_pretty(slots)
            .map_err(|e| SarrafError::Storage(e.to_string()))?;

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, contents).map_err(|e| SarrafError::Storage(e.to_string()))?;
        fs::rename(&tmp, &self.path).map_err(|e| SarrafError::Storage(e.to_string()))?;
        Ok(())
    }
}

impl StorageBackend for JsonFileBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.read().get(key).cloned())
    }

    fn write(&self, entries: &[(&'static str, String)]) -> Result<()> {
        let mut slots = self.slots.write();
        for (key, value) in entries {
            slots.insert((*key).to_string(), value.clone());
        }
        self.persist(&slots)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut slots = self.slots.write();
        slots.remove(key);
        self.persist(&slots)
    }

    fn clear(&self) -> Result<()> {
        let mut slots = self.slots.write();
        slots.clear();
        self.persist(&slots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_backend_roundtrip() {
        let backend = MemoryBackend::new();
        backend
            .write(&[("a", "1".to_string()), ("b", "2".to_string())])
            .unwrap();

        assert_eq!(backend.read("a").unwrap().as_deref(), Some("1"));
        assert_eq!(backend.read("b").unwrap().as_deref(), Some("2"));
        assert!(backend.read("c").unwrap().is_none());

        backend.remove("a").unwrap();
        assert!(backend.read("a").unwrap().is_none());

        backend.clear().unwrap();
        assert!(backend.read("b").unwrap().is_none());
    }

    #[test]
    fn test_file_backend_persists_across_opens() {
        let path = std::env::temp_dir().join(format!(
            "sarraf-store-test-{}.json",
            uuid::Uuid::new_v4()
        ));

        {
            let backend = JsonFileBackend::open(&path).unwrap();
            backend.write(&[("k", "v".to_string())]).unwrap();
        }

        let reopened = JsonFileBackend::open(&path).unwrap();
        assert_eq!(reopened.read("k").unwrap().as_deref(), Some("v"));

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_file_backend_missing_file_is_empty() {
        let path = std::env::temp_dir().join(format!(
            "sarraf-store-missing-{}.json",
            uuid::Uuid::new_v4()
        ));
        let backend = JsonFileBackend::open(&path).unwrap();
        assert!(backend.read("anything").unwrap().is_none());
    }
}

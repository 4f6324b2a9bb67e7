//! Durable key → JSON-document stores backing the fetch pipeline.
//!
//! [`get`](CacheStore::get) never triggers a network call; it returns `None`
//! only when no entry exists for the key. [`put`](CacheStore::put) is durable
//! before it returns and atomic: a failed write leaves the previous state,
//! including "no entry", unchanged. The pipeline writes each key at most once.

use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("cache I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("cache entry is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Substitute characters unsafe for durable storage addressing.
///
/// Deterministic, so the same identifier always maps to the same key
/// (DOIs contain `/`).
pub fn sanitize_key(key: &str) -> String {
    key.replace('/', "_")
}

/// A key → JSON-document store with read-through/write-through semantics.
pub trait CacheStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;
    fn put(&self, key: &str, document: &Value) -> Result<(), StoreError>;
}

/// One indented-JSON file per key under a namespace directory.
///
/// Entries survive across runs and accumulate indefinitely; there is no
/// teardown. Writes go to a temp file in the same directory and are renamed
/// into place after a sync.
pub struct JsonDirStore {
    dir: PathBuf,
}

impl JsonDirStore {
    /// Open (creating if needed) the namespace directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", sanitize_key(key)))
    }
}

impl CacheStore for JsonDirStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let path = self.entry_path(key);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&content)?))
    }

    fn put(&self, key: &str, document: &Value) -> Result<(), StoreError> {
        let path = self.entry_path(key);
        let content = serde_json::to_string_pretty(document)?;
        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| e.error)?;
        tracing::trace!(key, path = %path.display(), "cache entry written");
        Ok(())
    }
}

/// In-memory store, the test substitute for the injectable cache seam.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys currently present, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.lock().unwrap().keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }
}

impl CacheStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.entries.lock().unwrap().get(&sanitize_key(key)).cloned())
    }

    fn put(&self, key: &str, document: &Value) -> Result<(), StoreError> {
        self.entries
            .lock()
            .unwrap()
            .insert(sanitize_key(key), document.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sanitize_replaces_path_separators() {
        assert_eq!(sanitize_key("doi:10.1145/3540250.3549162"), "doi:10.1145_3540250.3549162");
        assert_eq!(sanitize_key("a/b/c"), "a_b_c");
        assert_eq!(sanitize_key("no separators"), "no separators");
    }

    #[test]
    fn memory_roundtrip() {
        let store = MemoryStore::new();
        assert!(store.get("k").unwrap().is_none());
        store.put("k", &json!({"x": 1})).unwrap();
        assert_eq!(store.get("k").unwrap().unwrap(), json!({"x": 1}));
    }

    #[test]
    fn memory_sanitizes_keys() {
        let store = MemoryStore::new();
        store.put("doi:10.1145/abc", &json!(1)).unwrap();
        // The sanitized spelling addresses the same entry.
        assert_eq!(store.get("doi:10.1145_abc").unwrap().unwrap(), json!(1));
        assert_eq!(store.keys(), vec!["doi:10.1145_abc".to_string()]);
    }

    #[test]
    fn dir_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonDirStore::open(dir.path().join("citations")).unwrap();
        assert!(store.get("doi:10.1145/abc").unwrap().is_none());
        store
            .put("doi:10.1145/abc", &json!({"citationCount": 3}))
            .unwrap();
        assert_eq!(
            store.get("doi:10.1145/abc").unwrap().unwrap(),
            json!({"citationCount": 3})
        );
    }

    #[test]
    fn dir_store_key_maps_to_single_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonDirStore::open(dir.path()).unwrap();
        store.put("doi:10.1145/a/b", &json!(null)).unwrap();
        assert!(dir.path().join("doi:10.1145_a_b.json").is_file());
    }

    #[test]
    fn dir_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = JsonDirStore::open(dir.path()).unwrap();
            store.put("k", &json!(["a", "b"])).unwrap();
        }
        let store = JsonDirStore::open(dir.path()).unwrap();
        assert_eq!(store.get("k").unwrap().unwrap(), json!(["a", "b"]));
    }

    #[test]
    fn dir_store_writes_indented_json() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonDirStore::open(dir.path()).unwrap();
        store.put("k", &json!({"a": 1, "b": 2})).unwrap();
        let content = std::fs::read_to_string(dir.path().join("k.json")).unwrap();
        assert!(content.contains('\n'), "expected indented output: {content}");
        assert_eq!(
            serde_json::from_str::<Value>(&content).unwrap(),
            json!({"a": 1, "b": 2})
        );
    }

    #[test]
    fn dir_store_leaves_no_temp_files_behind() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonDirStore::open(dir.path()).unwrap();
        store.put("k1", &json!(1)).unwrap();
        store.put("k2", &json!(2)).unwrap();
        let mut names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec!["k1.json", "k2.json"]);
    }
}

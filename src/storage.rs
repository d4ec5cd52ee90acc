use crate::calendar::parse_date_key;
use crate::errors::StoreError;
use crate::models::Entry;
use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::{env, io};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, error, warn};

pub const ENTRIES_KEY: &str = "entries";

pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + Send + 'a>>;

pub trait BlobStore: Send + Sync {
    fn get_item<'a>(&'a self, key: &'a str) -> StoreFuture<'a, Option<String>>;
    fn set_item<'a>(&'a self, key: &'a str, value: String) -> StoreFuture<'a, ()>;
}

#[derive(Debug, Clone)]
pub struct FileBlobStore {
    root: PathBuf,
}

impl FileBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }

    async fn write_blob(&self, key: &str, value: String) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root)
            .await
            .map_err(StoreError::Write)?;

        // Write beside the target and rename so readers never see half a blob.
        let path = self.path_for(key);
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, value).await.map_err(StoreError::Write)?;
        if let Err(err) = fs::rename(&staging, &path).await {
            if let Err(cleanup) = fs::remove_file(&staging).await {
                warn!(path = %staging.display(), "failed to remove staged blob: {cleanup}");
            }
            return Err(StoreError::Write(err));
        }
        debug!(path = %path.display(), "blob written");
        Ok(())
    }
}

impl BlobStore for FileBlobStore {
    fn get_item<'a>(&'a self, key: &'a str) -> StoreFuture<'a, Option<String>> {
        Box::pin(async move {
            match fs::read_to_string(self.path_for(key)).await {
                Ok(raw) => Ok(Some(raw)),
                Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
                Err(err) if err.kind() == ErrorKind::InvalidData => {
                    Err(StoreError::Malformed(err.to_string()))
                }
                Err(err) => Err(StoreError::Read(err)),
            }
        })
    }

    fn set_item<'a>(&'a self, key: &'a str, value: String) -> StoreFuture<'a, ()> {
        Box::pin(self.write_blob(key, value))
    }
}

#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    items: Mutex<HashMap<String, String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl BlobStore for MemoryBlobStore {
    fn get_item<'a>(&'a self, key: &'a str) -> StoreFuture<'a, Option<String>> {
        Box::pin(async move {
            if self.fail_reads.load(Ordering::SeqCst) {
                return Err(StoreError::Read(io::Error::other("store unavailable")));
            }
            Ok(self.items.lock().await.get(key).cloned())
        })
    }

    fn set_item<'a>(&'a self, key: &'a str, value: String) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(StoreError::Write(io::Error::other("store rejected write")));
            }
            self.items.lock().await.insert(key.to_string(), value);
            Ok(())
        })
    }
}

pub fn resolve_data_dir() -> PathBuf {
    if let Ok(path) = env::var("APP_DATA_DIR") {
        return PathBuf::from(path);
    }

    PathBuf::from("data")
}

/// Reads the entry collection. A missing blob is an empty collection; a blob
/// that does not parse, or that breaks the date or id invariants, is
/// `StoreError::Malformed`.
pub async fn load_entries(store: &dyn BlobStore) -> Result<Vec<Entry>, StoreError> {
    let Some(raw) = store.get_item(ENTRIES_KEY).await? else {
        return Ok(Vec::new());
    };
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }

    let entries: Vec<Entry> =
        serde_json::from_str(&raw).map_err(|err| StoreError::Malformed(err.to_string()))?;

    check_invariants(&entries)?;
    Ok(entries)
}

fn check_invariants(entries: &[Entry]) -> Result<(), StoreError> {
    let mut seen = HashSet::with_capacity(entries.len());
    for entry in entries {
        if parse_date_key(&entry.date).is_none() {
            return Err(StoreError::Malformed(format!(
                "entry {} has invalid date '{}'",
                entry.id, entry.date
            )));
        }
        if !seen.insert(entry.id.as_str()) {
            return Err(StoreError::Malformed(format!("duplicate entry id {}", entry.id)));
        }
    }
    Ok(())
}

pub async fn load_entries_or_empty(store: &dyn BlobStore) -> Vec<Entry> {
    match load_entries(store).await {
        Ok(entries) => entries,
        Err(StoreError::Malformed(reason)) => {
            error!("stored entries are malformed, continuing with none: {reason}");
            Vec::new()
        }
        Err(err) => {
            error!("failed to load entries: {err}");
            Vec::new()
        }
    }
}

pub async fn save_entries(store: &dyn BlobStore, entries: &[Entry]) -> Result<(), StoreError> {
    let payload =
        serde_json::to_string(entries).map_err(|err| StoreError::Write(io::Error::other(err)))?;
    store.set_item(ENTRIES_KEY, payload).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, date: &str) -> Entry {
        Entry {
            id: id.to_string(),
            title: format!("title {id}"),
            note: String::new(),
            date: date.to_string(),
            image_uri: None,
            voice_uri: Some(format!("file:///voice/{id}.m4a")),
        }
    }

    fn temp_root(tag: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        env::temp_dir().join(format!("diary_heatmap_{tag}_{}_{}", std::process::id(), nanos))
    }

    #[tokio::test]
    async fn missing_blob_loads_as_empty() {
        let store = MemoryBlobStore::new();
        assert!(load_entries(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn save_then_load_preserves_order_and_fields() {
        let store = MemoryBlobStore::new();
        let entries = vec![entry("2", "2024-05-03"), entry("1", "2024-05-01")];
        save_entries(&store, &entries).await.unwrap();

        assert_eq!(load_entries(&store).await.unwrap(), entries);
    }

    #[tokio::test]
    async fn persisted_layout_uses_camel_case_and_nulls() {
        let store = MemoryBlobStore::new();
        save_entries(&store, &[entry("1", "2024-05-01")]).await.unwrap();

        let raw = store.get_item(ENTRIES_KEY).await.unwrap().unwrap();
        assert_eq!(
            raw,
            r#"[{"id":"1","title":"title 1","note":"","date":"2024-05-01","imageUri":null,"voiceUri":"file:///voice/1.m4a"}]"#
        );
    }

    #[tokio::test]
    async fn unparsable_blob_is_malformed() {
        let store = MemoryBlobStore::new();
        store
            .set_item(ENTRIES_KEY, "{not json".to_string())
            .await
            .unwrap();

        assert!(matches!(
            load_entries(&store).await,
            Err(StoreError::Malformed(_))
        ));
        assert!(load_entries_or_empty(&store).await.is_empty());
    }

    #[tokio::test]
    async fn bad_date_or_duplicate_id_is_malformed() {
        let store = MemoryBlobStore::new();
        save_entries(&store, &[entry("1", "2024-5-1")]).await.unwrap();
        assert!(matches!(
            load_entries(&store).await,
            Err(StoreError::Malformed(_))
        ));

        save_entries(&store, &[entry("1", "2024-05-01"), entry("1", "2024-05-02")])
            .await
            .unwrap();
        assert!(matches!(
            load_entries(&store).await,
            Err(StoreError::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn read_failure_degrades_to_empty() {
        let store = MemoryBlobStore::new();
        save_entries(&store, &[entry("1", "2024-05-01")]).await.unwrap();
        store.set_fail_reads(true);

        assert!(matches!(load_entries(&store).await, Err(StoreError::Read(_))));
        assert!(load_entries_or_empty(&store).await.is_empty());
    }

    #[tokio::test]
    async fn write_failure_is_reported() {
        let store = MemoryBlobStore::new();
        store.set_fail_writes(true);

        assert!(matches!(
            save_entries(&store, &[entry("1", "2024-05-01")]).await,
            Err(StoreError::Write(_))
        ));
    }

    #[tokio::test]
    async fn file_store_round_trips_and_creates_root() {
        let root = temp_root("file_store");
        let store = FileBlobStore::new(&root);

        assert!(store.get_item(ENTRIES_KEY).await.unwrap().is_none());

        let entries = vec![entry("7", "2024-02-29")];
        save_entries(&store, &entries).await.unwrap();
        assert!(store.path_for(ENTRIES_KEY).exists());
        assert_eq!(load_entries(&store).await.unwrap(), entries);

        let _ = std::fs::remove_dir_all(root);
    }

    #[tokio::test]
    async fn file_store_reports_non_utf8_blob_as_malformed() {
        let root = temp_root("non_utf8");
        let store = FileBlobStore::new(&root);
        std::fs::create_dir_all(&root).unwrap();
        std::fs::write(store.path_for(ENTRIES_KEY), [0xff, 0xfe, 0x00]).unwrap();

        assert!(matches!(
            load_entries(&store).await,
            Err(StoreError::Malformed(_))
        ));
        assert!(load_entries_or_empty(&store).await.is_empty());

        let _ = std::fs::remove_dir_all(root);
    }

    #[tokio::test]
    async fn failed_rename_removes_staged_blob() {
        let root = temp_root("failed_rename");
        let store = FileBlobStore::new(&root);
        // A directory in the target's place makes the rename fail.
        std::fs::create_dir_all(store.path_for(ENTRIES_KEY)).unwrap();
        std::fs::write(store.path_for(ENTRIES_KEY).join("keep"), b"x").unwrap();

        let result = save_entries(&store, &[entry("1", "2024-05-01")]).await;
        assert!(matches!(result, Err(StoreError::Write(_))));
        assert!(!store.path_for(ENTRIES_KEY).with_extension("json.tmp").exists());

        let _ = std::fs::remove_dir_all(root);
    }
}

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Collection keys. Each holds one JSON array of records, except the session
/// key which holds a single record.
pub const ACCOUNTS: &str = "accounts";
pub const LISTINGS: &str = "listings";
pub const MESSAGES: &str = "messages";
pub const CURRENT_SESSION: &str = "current_session";

/// Key-value persistence shim: named records serialized as text.
///
/// Writes are whole-record replacements with no transaction boundary; the
/// system targets a single active session per store, so last write wins.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn read(&self, key: &str) -> anyhow::Result<Option<String>>;
    async fn write(&self, key: &str, value: &str) -> anyhow::Result<()>;
    async fn remove(&self, key: &str) -> anyhow::Result<()>;
}

/// File-backed store: one `<key>.json` file per record under a data directory.
#[derive(Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub async fn open(dir: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("create data dir {}", dir.display()))?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[async_trait]
impl RecordStore for JsonFileStore {
    async fn read(&self, key: &str) -> anyhow::Result<Option<String>> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("read record {key}")),
        }
    }

    async fn write(&self, key: &str, value: &str) -> anyhow::Result<()> {
        tokio::fs::write(self.path_for(key), value)
            .await
            .with_context(|| format!("write record {key}"))
    }

    async fn remove(&self, key: &str) -> anyhow::Result<()> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("remove record {key}")),
        }
    }
}

/// In-memory store used by tests.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<String, String>>,
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn read(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.records.lock().unwrap().get(key).cloned())
    }

    async fn write(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.records
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> anyhow::Result<()> {
        self.records.lock().unwrap().remove(key);
        Ok(())
    }
}

/// Parse a collection at the storage boundary. A missing key is an empty
/// collection; malformed text is an error, not silently discarded data.
pub async fn load_collection<T: DeserializeOwned>(
    store: &dyn RecordStore,
    key: &str,
) -> anyhow::Result<Vec<T>> {
    match store.read(key).await? {
        Some(text) => {
            serde_json::from_str(&text).with_context(|| format!("malformed {key} collection"))
        }
        None => Ok(Vec::new()),
    }
}

pub async fn save_collection<T: Serialize>(
    store: &dyn RecordStore,
    key: &str,
    rows: &[T],
) -> anyhow::Result<()> {
    let text =
        serde_json::to_string(rows).with_context(|| format!("serialize {key} collection"))?;
    store.write(key, &text).await
}

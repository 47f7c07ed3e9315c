//! Asynchronous key-value persistence.
//!
//! The core only ever talks to a [`KvStore`]: string keys, JSON values,
//! batched `get`/`set`. [`JsonFileStore`] backs the CLI with a single JSON
//! file in the user's home directory; [`MemoryStore`] backs tests and
//! embedding.

use std::io::Write;
use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;
use tokio::sync::Mutex;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[async_trait]
pub trait KvStore: Send + Sync {
    /// Fetch the requested keys. Keys with no stored value are simply absent
    /// from the returned map.
    async fn get(&self, keys: &[&str]) -> Result<Map<String, Value>, StorageError>;

    /// Upsert the given entries, leaving unrelated keys untouched.
    async fn set(&self, items: Map<String, Value>) -> Result<(), StorageError>;
}

/// File-backed store: one JSON object per installation, rewritten through a
/// temporary file and an atomic rename to avoid partial writes.
pub struct JsonFileStore {
    path: PathBuf,
    // `set` is read-merge-write; serialise writers so two of them cannot
    // interleave and drop each other's entries.
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new() -> Self {
        let home = dirs::home_dir().expect("couldn't find home dir");
        Self::with_path(home.join(".spendpause").join("data.json"))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    async fn read_all(&self) -> Result<Map<String, Value>, StorageError> {
        let path = self.path.clone();
        spawn_blocking(move || {
            let contents = match std::fs::read_to_string(&path) {
                Ok(contents) => contents,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
                Err(e) => return Err(e.into()),
            };
            if contents.trim().is_empty() {
                return Ok(Map::new());
            }
            Ok(serde_json::from_str(&contents)?)
        })
        .await
    }

    async fn write_all(&self, data: Map<String, Value>) -> Result<(), StorageError> {
        let path = self.path.clone();
        spawn_blocking(move || {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let temp = path.with_extension("tmp");
            let mut f = std::fs::File::create(&temp)?;
            let content = serde_json::to_string_pretty(&Value::Object(data))?;
            f.write_all(content.as_bytes())?;
            f.sync_all()?;
            std::fs::rename(temp, &path)?;
            Ok(())
        })
        .await
    }
}

impl Default for JsonFileStore {
    fn default() -> Self {
        Self::new()
    }
}

async fn spawn_blocking<T, F>(f: F) -> Result<T, StorageError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, StorageError> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| StorageError::Io(std::io::Error::other(format!("spawn_blocking failed: {e}"))))?
}

#[async_trait]
impl KvStore for JsonFileStore {
    async fn get(&self, keys: &[&str]) -> Result<Map<String, Value>, StorageError> {
        let all = self.read_all().await?;
        let mut out = Map::new();
        for key in keys {
            if let Some(value) = all.get(*key) {
                out.insert((*key).to_string(), value.clone());
            }
        }
        Ok(out)
    }

    async fn set(&self, items: Map<String, Value>) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut all = self.read_all().await?;
        for (key, value) in items {
            all.insert(key, value);
        }
        self.write_all(all).await
    }
}

/// In-memory store with the same semantics as [`JsonFileStore`].
#[derive(Default)]
pub struct MemoryStore {
    data: Mutex<Map<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn get(&self, keys: &[&str]) -> Result<Map<String, Value>, StorageError> {
        let data = self.data.lock().await;
        let mut out = Map::new();
        for key in keys {
            if let Some(value) = data.get(*key) {
                out.insert((*key).to_string(), value.clone());
            }
        }
        Ok(out)
    }

    async fn set(&self, items: Map<String, Value>) -> Result<(), StorageError> {
        let mut data = self.data.lock().await;
        for (key, value) in items {
            data.insert(key, value);
        }
        Ok(())
    }
}

//! Persistent key/value integers (the high score lives here).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use bevy::prelude::*;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage i/o on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("decoding {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("encoding store: {0}")]
    Encode(#[from] ron::Error),
}

pub trait KeyValueStore: Send + Sync + 'static {
    fn get(&self, key: &str) -> Option<i64>;
    fn set(&mut self, key: &str, value: i64);
    fn flush(&mut self) -> Result<(), StorageError>;
}

#[derive(Resource)]
pub struct ScoreStorage(pub Box<dyn KeyValueStore>);

impl ScoreStorage {
    pub fn new(store: impl KeyValueStore) -> Self {
        Self(Box::new(store))
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryStore::default())
    }
}

/// Process-lifetime store; what headless apps and tests use.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: BTreeMap<String, i64>,
    pub flushes: usize,
}

impl MemoryStore {
    pub fn with(key: &str, value: i64) -> Self {
        let mut store = Self::default();
        store.values.insert(key.to_owned(), value);
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<i64> {
        self.values.get(key).copied()
    }

    fn set(&mut self, key: &str, value: i64) {
        self.values.insert(key.to_owned(), value);
    }

    fn flush(&mut self) -> Result<(), StorageError> {
        self.flushes += 1;
        Ok(())
    }
}

/// RON map on disk. Writes are buffered until `flush`.
#[derive(Debug)]
pub struct RonFileStore {
    path: PathBuf,
    values: BTreeMap<String, i64>,
}

impl RonFileStore {
    /// Open `path`, starting empty if the file does not exist yet.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        let values = match std::fs::read_to_string(&path) {
            Ok(text) => ron::from_str(&text).map_err(|source| StorageError::Decode {
                path: path.clone(),
                source,
            })?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(StorageError::Io { path, source }),
        };
        Ok(Self { path, values })
    }
}

impl KeyValueStore for RonFileStore {
    fn get(&self, key: &str) -> Option<i64> {
        self.values.get(key).copied()
    }

    fn set(&mut self, key: &str, value: i64) {
        self.values.insert(key.to_owned(), value);
    }

    fn flush(&mut self) -> Result<(), StorageError> {
        let text = ron::ser::to_string_pretty(&self.values, ron::ser::PrettyConfig::default())?;
        std::fs::write(&self.path, text).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

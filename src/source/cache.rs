//response caching for the data source
//
//entries carry the time they were stored and count as missing once they are
//older than the store's time-to-live

use crate::source::error::SourceError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tracing::{debug, warn};

//how a single request interacts with the cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheMode {
    //serve a fresh entry if present, otherwise fetch and store
    #[default]
    Use,
    //always fetch, then overwrite the stored entry
    Refresh,
    //always fetch and leave the cache untouched
    Bypass,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub stored_at: DateTime<Utc>,
    pub body: String,
}

impl CacheEntry {
    pub fn new(body: impl Into<String>) -> Self {
        CacheEntry {
            stored_at: Utc::now(),
            body: body.into(),
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        match chrono::Duration::from_std(ttl) {
            Ok(ttl) => now - self.stored_at >= ttl,
            //a ttl beyond chrono's range never expires
            Err(_) => false,
        }
    }
}

//key-value store injected into the data source
pub trait CacheStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, SourceError>;

    fn put(&self, key: &str, body: &str) -> Result<(), SourceError>;

    fn remove(&self, key: &str) -> Result<(), SourceError>;

    //removes every entry, returning how many were dropped
    fn clear(&self) -> Result<usize, SourceError>;
}

//process-local cache
#[derive(Debug)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl MemoryCache {
    pub fn new(ttl: Duration) -> Self {
        MemoryCache {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    //a zero ttl disables the cache
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, CacheEntry>> {
        //a poisoned map is still structurally valid
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl CacheStore for MemoryCache {
    fn get(&self, key: &str) -> Result<Option<String>, SourceError> {
        let mut entries = self.lock();
        let expired = match entries.get(key) {
            None => return Ok(None),
            Some(entry) => entry.is_expired_at(Utc::now(), self.ttl),
        };

        if expired {
            debug!(key, "cache entry expired");
            entries.remove(key);
            return Ok(None);
        }

        Ok(entries.get(key).map(|entry| entry.body.clone()))
    }

    fn put(&self, key: &str, body: &str) -> Result<(), SourceError> {
        if self.ttl.is_zero() {
            return Ok(());
        }
        self.lock().insert(key.to_string(), CacheEntry::new(body));
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SourceError> {
        self.lock().remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<usize, SourceError> {
        let mut entries = self.lock();
        let count = entries.len();
        entries.clear();
        Ok(count)
    }
}

//suffix that marks a file as one of ours; clear never touches anything else
const ENTRY_SUFFIX: &str = ".cache.json";

//persists each entry as a json file under a directory, surviving between runs
#[derive(Debug, Clone)]
pub struct FileCache {
    dir: PathBuf,
    ttl: Duration,
}

impl FileCache {
    pub fn new(dir: impl Into<PathBuf>, ttl: Duration) -> Self {
        FileCache {
            dir: dir.into(),
            ttl,
        }
    }

    //file backing `key`; keys are reduced to a safe file name
    pub fn entry_path(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{}{}", name, ENTRY_SUFFIX))
    }

    fn read_entry(&self, path: &Path) -> Result<Option<CacheEntry>, SourceError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&contents) {
            Ok(entry) => Ok(Some(entry)),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring unreadable cache entry");
                Ok(None)
            }
        }
    }
}

impl CacheStore for FileCache {
    fn get(&self, key: &str) -> Result<Option<String>, SourceError> {
        let path = self.entry_path(key);
        let entry = match self.read_entry(&path)? {
            Some(entry) => entry,
            None => return Ok(None),
        };

        if entry.is_expired_at(Utc::now(), self.ttl) {
            debug!(key, stored_at = %entry.stored_at, "cache entry expired");
            self.remove(key)?;
            return Ok(None);
        }

        Ok(Some(entry.body))
    }

    fn put(&self, key: &str, body: &str) -> Result<(), SourceError> {
        if self.ttl.is_zero() {
            return Ok(());
        }
        std::fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string(&CacheEntry::new(body))?;
        std::fs::write(self.entry_path(key), json)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SourceError> {
        match std::fs::remove_file(self.entry_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn clear(&self) -> Result<usize, SourceError> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };

        let mut removed = 0;
        for entry in entries {
            let path = entry?.path();
            let is_entry = path
                .file_name()
                .and_then(|name| name.to_str())
                .map(|name| name.ends_with(ENTRY_SUFFIX))
                .unwrap_or(false);
            if is_entry && path.is_file() {
                std::fs::remove_file(&path)?;
                removed += 1;
            }
        }
        Ok(removed)
    }
}

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{CountdownError, Result};

/// Browser-style local storage: string keys to string values
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, failing with `QuotaExceeded` when the store is full
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Bytes used by all entries once `key` holds `value`
fn usage_with(entries: &BTreeMap<String, String>, key: &str, value: &str) -> usize {
    entries
        .iter()
        .filter(|(k, _)| k.as_str() != key)
        .map(|(k, v)| k.len() + v.len())
        .sum::<usize>()
        + key.len()
        + value.len()
}

fn check_quota(
    entries: &BTreeMap<String, String>,
    key: &str,
    value: &str,
    quota: Option<usize>,
) -> Result<()> {
    if let Some(quota) = quota {
        let needed = usage_with(entries, key, value);
        if needed > quota {
            return Err(CountdownError::QuotaExceeded { needed, quota });
        }
    }
    Ok(())
}

/// Key-value store persisted as a single JSON object file
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    quota: usize,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`; a missing file is an empty store
    pub fn open(path: &Path, quota: usize) -> Result<Self> {
        let entries = if path.exists() {
            let content = fs::read_to_string(path).map_err(|e| {
                CountdownError::Store(format!("Cannot read storage file '{}': {}", path.display(), e))
            })?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content).map_err(|e| {
                    CountdownError::Store(format!(
                        "Storage file '{}' is corrupt: {}",
                        path.display(),
                        e
                    ))
                })?
            }
        } else {
            BTreeMap::new()
        };

        debug!(path = %path.display(), keys = entries.len(), "opened storage file");
        Ok(Self {
            path: path.to_path_buf(),
            quota,
            entries,
        })
    }

    fn flush(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.entries)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        check_quota(&self.entries, key, value, Some(self.quota))?;
        let previous = self.entries.insert(key.to_string(), value.to_string());
        if let Err(e) = self.flush() {
            // Keep memory in line with what is on disk
            match previous {
                Some(previous) => self.entries.insert(key.to_string(), previous),
                None => self.entries.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if let Some(previous) = self.entries.remove(key) {
            if let Err(e) = self.flush() {
                self.entries.insert(key.to_string(), previous);
                return Err(e);
            }
        }
        Ok(())
    }
}

/// In-process store, used where nothing should touch the disk
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryStore {
    quota: Option<usize>,
    entries: BTreeMap<String, String>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota: usize) -> Self {
        Self {
            quota: Some(quota),
            entries: BTreeMap::new(),
        }
    }
}

#[cfg(test)]
impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        check_quota(&self.entries, key, value, self.quota)?;
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Exam countdown configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where the catalog and selection are persisted
    pub storage: Storage,

    /// Document conversion service
    pub remote: Remote,

    /// Display settings
    pub display: Display,
}

/// Storage settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Storage {
    /// JSON file holding both stored records
    pub path: PathBuf,

    /// Maximum bytes the stored keys and values may take
    pub quota_bytes: usize,
}

/// Conversion service settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Remote {
    /// URL the documents are posted to; remote import is off without one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Seconds to wait for the service
    pub timeout_secs: u64,
}

/// Display configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Display {
    /// Milliseconds between countdown updates in `watch`
    pub tick_interval_ms: u64,
}

impl Remote {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Display {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

impl Default for Storage {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./.exam-countdown-storage.json"),
            quota_bytes: 5 * 1024 * 1024,
        }
    }
}

impl Default for Remote {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_secs: 60,
        }
    }
}

impl Default for Display {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1000,
        }
    }
}

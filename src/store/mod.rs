//! Persistence module
//!
//! Keeps the exam catalog and the user's selection as two independent JSON
//! slots in a key-value store. A missing slot is reported as `None`, which
//! callers must keep apart from an empty list.

mod kv;

pub use kv::{FileStore, KeyValueStore};
#[cfg(test)]
pub use kv::MemoryStore;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::{CountdownError, Result};
use crate::models::{ExamRecord, Selection};

/// Key holding the imported exam catalog
pub const CATALOG_KEY: &str = "customExamsData";

/// Key holding the selected exam codes
pub const SELECTION_KEY: &str = "selectedExams";

/// Typed access to the catalog and selection slots
#[derive(Debug)]
pub struct ExamStore<S: KeyValueStore> {
    backend: S,
}

impl<S: KeyValueStore> ExamStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    #[cfg(test)]
    pub fn backend_mut(&mut self) -> &mut S {
        &mut self.backend
    }

    pub fn load_catalog(&self) -> Result<Option<Vec<ExamRecord>>> {
        self.load(CATALOG_KEY)
    }

    /// Persist the catalog; on failure nothing about the previous slot changes
    pub fn save_catalog(&mut self, exams: &[ExamRecord]) -> Result<()> {
        let json = serde_json::to_string(exams)?;
        self.backend.set(CATALOG_KEY, &json).inspect_err(|e| {
            warn!(error = %e, "could not save exam catalog");
        })?;
        debug!(count = exams.len(), "saved exam catalog");
        Ok(())
    }

    /// Raw catalog slot, kept unparsed so even a corrupt slot can be put back
    pub fn catalog_snapshot(&self) -> Result<Option<String>> {
        self.backend.get(CATALOG_KEY)
    }

    /// Put back a slot taken with [`catalog_snapshot`](Self::catalog_snapshot); `None` deletes it
    pub fn restore_catalog(&mut self, snapshot: Option<&str>) -> Result<()> {
        match snapshot {
            Some(text) => self.backend.set(CATALOG_KEY, text),
            None => self.backend.remove(CATALOG_KEY),
        }
    }

    pub fn load_selection(&self) -> Result<Option<Selection>> {
        self.load(SELECTION_KEY)
    }

    pub fn save_selection(&mut self, selection: &Selection) -> Result<()> {
        let json = serde_json::to_string(selection)?;
        self.backend.set(SELECTION_KEY, &json)?;
        debug!(count = selection.len(), "saved selection");
        Ok(())
    }

    /// Delete the selection so the next start prompts again
    pub fn remove_selection(&mut self) -> Result<()> {
        self.backend.remove(SELECTION_KEY)
    }

    /// Delete both slots
    pub fn clear_all(&mut self) -> Result<()> {
        self.backend.remove(CATALOG_KEY)?;
        self.backend.remove(SELECTION_KEY)?;
        debug!("cleared catalog and selection");
        Ok(())
    }

    fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.backend.get(key)? {
            Some(text) => serde_json::from_str(&text).map(Some).map_err(|e| {
                CountdownError::Store(format!("Stored value '{}' is not valid: {}", key, e))
            }),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_exams() -> Vec<ExamRecord> {
        vec![
            ExamRecord {
                code: "CS101".to_string(),
                name: "Intro".to_string(),
                date: "01.01.2030".to_string(),
                time: "09:00".to_string(),
                classes: Some("A1".to_string()),
            },
            ExamRecord {
                code: "MATH200".to_string(),
                name: "Calculus".to_string(),
                date: "15.12.2029".to_string(),
                time: "13:30".to_string(),
                classes: None,
            },
        ]
    }

    #[test]
    fn test_catalog_roundtrip_keeps_order() {
        let mut store = ExamStore::new(MemoryStore::new());
        assert_eq!(store.load_catalog().unwrap(), None);

        store.save_catalog(&sample_exams()).unwrap();
        assert_eq!(store.load_catalog().unwrap(), Some(sample_exams()));
    }

    #[test]
    fn test_selection_absent_empty_and_non_empty() {
        let mut store = ExamStore::new(MemoryStore::new());
        assert_eq!(store.load_selection().unwrap(), None);

        store.save_selection(&Selection::default()).unwrap();
        assert_eq!(store.load_selection().unwrap(), Some(Selection::default()));

        let chosen = Selection::new(vec!["CS101".to_string()]);
        store.save_selection(&chosen).unwrap();
        assert_eq!(store.load_selection().unwrap(), Some(chosen));

        store.remove_selection().unwrap();
        assert_eq!(store.load_selection().unwrap(), None);
    }

    #[test]
    fn test_clear_all() {
        let mut store = ExamStore::new(MemoryStore::new());
        store.save_catalog(&sample_exams()).unwrap();
        store
            .save_selection(&Selection::new(vec!["CS101".to_string()]))
            .unwrap();

        store.clear_all().unwrap();
        assert_eq!(store.load_catalog().unwrap(), None);
        assert_eq!(store.load_selection().unwrap(), None);
    }

    #[test]
    fn test_save_catalog_over_quota_keeps_previous() {
        let mut store = ExamStore::new(MemoryStore::with_quota(300));
        let first = vec![sample_exams()[0].clone()];
        store.save_catalog(&first).unwrap();

        let huge: Vec<ExamRecord> = (0..20)
            .map(|i| ExamRecord {
                code: format!("BIG{i}"),
                ..sample_exams()[0].clone()
            })
            .collect();
        let err = store.save_catalog(&huge).unwrap_err();
        assert!(matches!(err, CountdownError::QuotaExceeded { .. }));
        assert_eq!(store.load_catalog().unwrap(), Some(first));
    }

    #[test]
    fn test_restore_catalog() {
        let mut store = ExamStore::new(MemoryStore::new());
        assert_eq!(store.catalog_snapshot().unwrap(), None);
        store.save_catalog(&sample_exams()).unwrap();
        let snapshot = store.catalog_snapshot().unwrap();

        store.restore_catalog(None).unwrap();
        assert_eq!(store.load_catalog().unwrap(), None);

        store.restore_catalog(snapshot.as_deref()).unwrap();
        assert_eq!(store.load_catalog().unwrap(), Some(sample_exams()));
    }

    #[test]
    fn test_corrupt_slot_is_reported() {
        let mut backend = MemoryStore::new();
        backend.set(SELECTION_KEY, "not json").unwrap();
        let store = ExamStore::new(backend);

        let err = store.load_selection().unwrap_err();
        assert!(err.to_string().contains(SELECTION_KEY));
    }
}

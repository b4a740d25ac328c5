//! Selection checklist
//!
//! The checklist is built from the catalog, sorted by exam time, and
//! pre-checked from the stored selection. Toggling entries never persists
//! anything; only committing the chosen codes does.

use crate::models::{sort_by_instant, ExamRecord, Selection};

/// One checkbox in the selection checklist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceEntry {
    pub code: String,
    pub label: String,
    pub checked: bool,
}

/// The checklist shown when the user picks which exams to track
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionPrompt {
    entries: Vec<ChoiceEntry>,
}

impl SelectionPrompt {
    /// Build the checklist; an absent selection pre-checks nothing
    pub fn new(catalog: &[ExamRecord], current: Option<&Selection>) -> Self {
        let mut exams = catalog.to_vec();
        sort_by_instant(&mut exams);

        let entries = exams
            .into_iter()
            .map(|exam| ChoiceEntry {
                checked: current.is_some_and(|selection| selection.contains(&exam.code)),
                label: format!("{} - {} ({})", exam.code, exam.name, exam.date),
                code: exam.code,
            })
            .collect();

        Self { entries }
    }

    pub fn entries(&self) -> &[ChoiceEntry] {
        &self.entries
    }

    /// Flip the checkbox at `index`; returns false when out of range
    pub fn toggle(&mut self, index: usize) -> bool {
        match self.entries.get_mut(index) {
            Some(entry) => {
                entry.checked = !entry.checked;
                true
            }
            None => false,
        }
    }

    /// Set one checkbox by code; returns false for unknown codes
    pub fn set_checked(&mut self, code: &str, checked: bool) -> bool {
        match self.entries.iter_mut().find(|entry| entry.code == code) {
            Some(entry) => {
                entry.checked = checked;
                true
            }
            None => false,
        }
    }

    /// The select-all toggle: every checkbox follows `checked`
    pub fn set_all(&mut self, checked: bool) {
        for entry in &mut self.entries {
            entry.checked = checked;
        }
    }

    /// Whether every entry is checked (state of the select-all box)
    pub fn all_checked(&self) -> bool {
        !self.entries.is_empty() && self.entries.iter().all(|entry| entry.checked)
    }

    /// Checked codes in checklist order
    pub fn chosen(&self) -> Selection {
        Selection::new(
            self.entries
                .iter()
                .filter(|entry| entry.checked)
                .map(|entry| entry.code.clone())
                .collect(),
        )
    }
}

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::timefmt;

/// A single exam as imported by the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamRecord {
    /// Course code, unique within a catalog
    pub code: String,
    /// Course name (may be empty)
    pub name: String,
    /// Exam date as DD.MM.YYYY
    pub date: String,
    /// Exam start as HH:MM (24h)
    pub time: String,
    /// Rooms or class groups, display only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classes: Option<String>,
}

impl ExamRecord {
    /// Local wall-clock instant of the exam, if date and time parse
    pub fn instant(&self) -> Option<DateTime<Local>> {
        timefmt::parse_exam_instant(&self.date, &self.time).ok()
    }

    /// Display title: code and name joined by a dash
    pub fn title(&self) -> String {
        timefmt::exam_title(&self.code, &self.name)
    }

    /// Classes text, or N/A when missing or blank
    pub fn classes_or_na(&self) -> &str {
        match self.classes.as_deref() {
            Some(classes) if !classes.is_empty() => classes,
            _ => "N/A",
        }
    }
}

/// Sort exams ascending by instant; unparseable dates go last, stable otherwise
pub fn sort_by_instant(exams: &mut [ExamRecord]) {
    exams.sort_by_cached_key(|exam| match exam.instant() {
        Some(instant) => (0, instant.timestamp()),
        None => (1, 0),
    });
}

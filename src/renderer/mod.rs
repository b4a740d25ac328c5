//! Countdown renderer module
//!
//! Projects the selected part of the catalog onto a [`RenderSurface`] and
//! keeps the painted countdowns current on every tick. The renderer never
//! draws anything itself; it only drives the surface.

#[cfg(test)]
pub mod memory;

use chrono::{DateTime, Local};
use tracing::{trace, warn};

use crate::models::{sort_by_instant, ExamRecord, Selection};
use crate::timefmt::{format_long_date, format_remaining};

/// Countdown text once an exam has started
pub const PASSED_LABEL: &str = "Exam time has passed.";

/// Countdown text for exams whose date or time cannot be read
pub const INVALID_DATE_LABEL: &str = "Invalid exam date";

/// Messages shown instead of countdown records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// Nothing has been imported yet (or the schedule was reset)
    NoSchedule,
    /// The imported schedule holds no exams
    EmptyCatalog,
    /// The user chose to track no exams
    NoExamsSelected,
    /// The selection names codes that are not in the catalog
    StaleSelection,
}

/// Everything a surface needs to paint one exam
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFields {
    /// Stable record id, the exam code
    pub id: String,
    pub title: String,
    pub date_line: String,
    pub classes_line: String,
    pub countdown: String,
    pub passed: bool,
}

/// Where countdowns are painted
pub trait RenderSurface {
    fn clear(&mut self);

    fn show_notice(&mut self, notice: Notice);

    fn append_record(&mut self, fields: RecordFields);

    fn update_record_text(&mut self, id: &str, text: &str);

    fn mark_record_passed(&mut self, id: &str);

    /// Called once a handler has finished changing the surface
    fn flush(&mut self) {}
}

/// What is currently painted, per exam code
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayState {
    entries: Vec<DisplayEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct DisplayEntry {
    code: String,
    passed: bool,
    /// False when the exam date cannot be read; such records never tick
    countable: bool,
}

impl DisplayState {
    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Records still counting down
    pub fn pending(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.countable && !entry.passed)
            .count()
    }

    #[cfg(test)]
    pub fn is_passed(&self, code: &str) -> bool {
        self.entry(code).is_some_and(|entry| entry.passed)
    }

    #[cfg(test)]
    fn entry(&self, code: &str) -> Option<&DisplayEntry> {
        self.entries.iter().find(|entry| entry.code == code)
    }

    fn entry_mut(&mut self, code: &str) -> Option<&mut DisplayEntry> {
        self.entries.iter_mut().find(|entry| entry.code == code)
    }
}

/// Counts from one refresh pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    pub updated: usize,
    pub newly_passed: usize,
}

/// Selected exams in display order
pub fn selected_exams(catalog: &[ExamRecord], selection: &Selection) -> Vec<ExamRecord> {
    let mut exams: Vec<ExamRecord> = catalog
        .iter()
        .filter(|exam| selection.contains(&exam.code))
        .cloned()
        .collect();
    sort_by_instant(&mut exams);
    exams
}

/// Clear the surface and paint the selected exams.
///
/// Returns what was painted so later ticks can update it in place.
pub fn render_countdowns<S>(
    catalog: &[ExamRecord],
    selection: Option<&Selection>,
    now: DateTime<Local>,
    surface: &mut S,
) -> DisplayState
where
    S: RenderSurface + ?Sized,
{
    surface.clear();

    let Some(selection) = selection else {
        warn!("render requested before any selection was made");
        return DisplayState::default();
    };

    let exams = selected_exams(catalog, selection);
    if exams.is_empty() {
        if selection.is_empty() {
            surface.show_notice(Notice::NoExamsSelected);
        } else {
            surface.show_notice(Notice::StaleSelection);
        }
        return DisplayState::default();
    }

    let mut state = DisplayState::default();
    for exam in &exams {
        let fields = record_fields(exam, now);
        state.entries.push(DisplayEntry {
            code: exam.code.clone(),
            passed: fields.passed,
            countable: exam.instant().is_some(),
        });
        surface.append_record(fields);
    }
    state
}

fn record_fields(exam: &ExamRecord, now: DateTime<Local>) -> RecordFields {
    let (date_line, countdown, passed) = match exam.instant() {
        Some(instant) => {
            let remaining_ms = (instant - now).num_milliseconds();
            let date_line = format!("Date: {}", format_long_date(&instant));
            if remaining_ms <= 0 {
                (date_line, PASSED_LABEL.to_string(), true)
            } else {
                (date_line, format_remaining(remaining_ms), false)
            }
        }
        None => (
            "Date: invalid date/time".to_string(),
            INVALID_DATE_LABEL.to_string(),
            false,
        ),
    };

    RecordFields {
        id: exam.code.clone(),
        title: exam.title(),
        date_line,
        classes_line: format!("Classes: {}", exam.classes_or_na()),
        countdown,
        passed,
    }
}

/// Recompute every painted countdown in place.
///
/// Codes without a catalog entry or without a painted record are skipped;
/// that happens briefly while a new schedule replaces the old one.
pub fn refresh_countdowns<S>(
    catalog: &[ExamRecord],
    selection: &Selection,
    display: &mut DisplayState,
    now: DateTime<Local>,
    surface: &mut S,
) -> TickOutcome
where
    S: RenderSurface + ?Sized,
{
    let mut outcome = TickOutcome::default();

    for code in selection.codes() {
        let Some(exam) = catalog.iter().find(|exam| &exam.code == code) else {
            continue;
        };
        let Some(entry) = display.entry_mut(code) else {
            continue;
        };
        let Some(instant) = exam.instant() else {
            continue;
        };

        let remaining_ms = (instant - now).num_milliseconds();
        if remaining_ms > 0 {
            surface.update_record_text(code, &format_remaining(remaining_ms));
            outcome.updated += 1;
        } else if !entry.passed {
            surface.update_record_text(code, PASSED_LABEL);
            surface.mark_record_passed(code);
            entry.passed = true;
            outcome.newly_passed += 1;
        }
    }

    trace!(
        updated = outcome.updated,
        newly_passed = outcome.newly_passed,
        "refreshed countdowns"
    );
    outcome
}

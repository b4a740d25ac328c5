//! Calendar CSV export
//!
//! Produces the CSV layout calendar importers accept: month-first dates and
//! an AM/PM suffix on the start time.

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::error::{CountdownError, Result};
use crate::models::ExamRecord;

pub const CSV_HEADER: &str = "Subject, Start date, Start time, Location\n";

/// Render `exams` as calendar CSV, one quoted row per exam
pub fn export_csv(exams: &[ExamRecord]) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(CSV_HEADER.as_bytes().to_vec());

    for exam in exams {
        writer.write_record([
            exam.title(),
            calendar_date(exam)?,
            calendar_time(exam)?,
            exam.classes.clone().unwrap_or_default(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| CountdownError::Export(format!("Cannot finish CSV output: {}", e)))?;
    String::from_utf8(bytes).map_err(|e| CountdownError::Export(e.to_string()))
}

/// `DD.MM.YYYY` to `MM/DD/YYYY`
fn calendar_date(exam: &ExamRecord) -> Result<String> {
    let parts: Vec<&str> = exam.date.split('.').collect();
    match parts.as_slice() {
        [day, month, year] => Ok(format!("{month}/{day}/{year}")),
        _ => Err(CountdownError::Export(format!(
            "Exam '{}' has an unreadable date '{}'",
            exam.code, exam.date
        ))),
    }
}

/// `HH:MM` with ` PM` from noon onwards, ` AM` before
fn calendar_time(exam: &ExamRecord) -> Result<String> {
    let hour: u32 = exam
        .time
        .split(':')
        .next()
        .and_then(|hour| hour.trim().parse().ok())
        .ok_or_else(|| {
            CountdownError::Export(format!(
                "Exam '{}' has an unreadable time '{}'",
                exam.code, exam.time
            ))
        })?;
    let suffix = if hour >= 12 { "PM" } else { "AM" };
    Ok(format!("{} {}", exam.time, suffix))
}

//! Date and duration formatting
//!
//! Exam dates arrive as `DD.MM.YYYY` and times as `HH:MM` in the viewer's
//! local wall-clock time. No timezone normalization happens anywhere.

use chrono::{DateTime, Local, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

use crate::error::{CountdownError, Result};

const MS_PER_SECOND: i64 = 1_000;
const SECONDS_PER_DAY: i64 = 24 * 3_600;

/// Parse an exam date and time as a local instant
pub fn parse_exam_instant(date: &str, time: &str) -> Result<DateTime<Local>> {
    parse_exam_instant_in(&Local, date, time)
}

/// Parse an exam date and time as an instant in `timezone`.
///
/// Ambiguous wall-clock times (clocks falling back) resolve to the earlier
/// instant; times inside a spring-forward gap do not exist and are rejected.
pub fn parse_exam_instant_in<Tz>(timezone: &Tz, date: &str, time: &str) -> Result<DateTime<Tz>>
where
    Tz: TimeZone,
{
    let naive = parse_naive(date, time)?;
    match timezone.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(dt),
        LocalResult::Ambiguous(first, _second) => Ok(first),
        LocalResult::None => Err(CountdownError::Format(format!(
            "'{date} {time}' does not exist in the local timezone"
        ))),
    }
}

fn parse_naive(date: &str, time: &str) -> Result<NaiveDateTime> {
    let invalid_date = || CountdownError::Format(format!("invalid date '{date}', expected DD.MM.YYYY"));
    let invalid_time = || CountdownError::Format(format!("invalid time '{time}', expected HH:MM"));

    let mut date_parts = date.split('.').map(str::trim);
    let day = next_number::<u32>(&mut date_parts).ok_or_else(invalid_date)?;
    // Month is 1-based in the input, as chrono expects
    let month = next_number::<u32>(&mut date_parts).ok_or_else(invalid_date)?;
    let year = next_number::<i32>(&mut date_parts).ok_or_else(invalid_date)?;

    let mut time_parts = time.split(':').map(str::trim);
    let hour = next_number::<u32>(&mut time_parts).ok_or_else(invalid_time)?;
    let minute = next_number::<u32>(&mut time_parts).ok_or_else(invalid_time)?;

    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid_date)?;
    let time = NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(invalid_time)?;
    Ok(NaiveDateTime::new(date, time))
}

fn next_number<'a, T: std::str::FromStr>(parts: &mut impl Iterator<Item = &'a str>) -> Option<T> {
    parts.next()?.parse().ok()
}

/// Format a remaining duration as `"{d}d {h}h {m}m {s}s"`.
///
/// Negative durations clamp to zero; each unit is truncated, never rounded.
pub fn format_remaining(duration_ms: i64) -> String {
    let total_seconds = duration_ms.max(0) / MS_PER_SECOND;
    let days = total_seconds / SECONDS_PER_DAY;
    let hours = (total_seconds % SECONDS_PER_DAY) / 3_600;
    let minutes = (total_seconds % 3_600) / 60;
    let seconds = total_seconds % 60;
    format!("{days}d {hours}h {minutes}m {seconds}s")
}

/// Long-form local date, e.g. `1 January 2030 at 09:00`
pub fn format_long_date<Tz>(instant: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    instant.format("%-d %B %Y at %H:%M").to_string()
}

/// Exam title: code and name joined with a dash, name omitted when empty
pub fn exam_title(code: &str, name: &str) -> String {
    if name.is_empty() {
        code.to_string()
    } else {
        format!("{code}-{name}")
    }
}

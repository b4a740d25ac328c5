use std::collections::HashSet;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::error::CountdownError;
use crate::models::ExamRecord;

/// Why an imported exam list was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaViolation {
    #[error("imported data is not a JSON array")]
    NotAnArray,

    #[error("exam #{index} is not an object")]
    NotAnObject { index: usize },

    #[error("exam #{index} is missing the '{field}' field")]
    MissingField { index: usize, field: &'static str },

    #[error("exam #{index} has a non-string '{field}' field")]
    WrongType { index: usize, field: &'static str },

    #[error("exam #{index} has an empty code")]
    EmptyCode { index: usize },

    #[error("exam #{index} repeats the code '{code}'")]
    DuplicateCode { index: usize, code: String },
}

impl From<SchemaViolation> for CountdownError {
    fn from(violation: SchemaViolation) -> Self {
        CountdownError::Format(violation.to_string())
    }
}

/// Check the shape of an imported exam list and convert it.
///
/// The whole list is rejected on the first violation. Exam numbers in
/// messages are 1-based.
pub fn validate_exams(value: &Value) -> Result<Vec<ExamRecord>, SchemaViolation> {
    let items = value.as_array().ok_or(SchemaViolation::NotAnArray)?;

    let mut seen = HashSet::new();
    let mut exams = Vec::with_capacity(items.len());
    for (position, item) in items.iter().enumerate() {
        let index = position + 1;
        let object = item
            .as_object()
            .ok_or(SchemaViolation::NotAnObject { index })?;

        let code = required_string(object, index, "code")?;
        let name = required_string(object, index, "name")?;
        let date = required_string(object, index, "date")?;
        let time = required_string(object, index, "time")?;
        let classes = optional_string(object, index, "classes")?;

        if code.is_empty() {
            return Err(SchemaViolation::EmptyCode { index });
        }
        if !seen.insert(code.clone()) {
            return Err(SchemaViolation::DuplicateCode { index, code });
        }

        exams.push(ExamRecord {
            code,
            name,
            date,
            time,
            classes,
        });
    }

    Ok(exams)
}

fn required_string(
    object: &Map<String, Value>,
    index: usize,
    field: &'static str,
) -> Result<String, SchemaViolation> {
    match object.get(field) {
        Some(Value::String(text)) => Ok(text.clone()),
        Some(_) => Err(SchemaViolation::WrongType { index, field }),
        None => Err(SchemaViolation::MissingField { index, field }),
    }
}

fn optional_string(
    object: &Map<String, Value>,
    index: usize,
    field: &'static str,
) -> Result<Option<String>, SchemaViolation> {
    match object.get(field) {
        Some(Value::String(text)) => Ok(Some(text.clone())),
        Some(Value::Null) | None => Ok(None),
        Some(_) => Err(SchemaViolation::WrongType { index, field }),
    }
}

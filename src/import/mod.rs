//! Import pipeline module
//!
//! Turns exam lists from a JSON file, pasted text, or the remote conversion
//! service into validated records. Committing them is the caller's job; this
//! module never touches the store.

mod clean;
mod remote;
mod schema;

pub use clean::clean_pasted_json;
pub use remote::{
    build_request, detect_mime, interpret_response, ConversionRequest, Converter, HttpConverter,
};
pub use schema::validate_exams;

use serde_json::Value;
use tracing::debug;

use crate::error::{CountdownError, Result};
use crate::models::ExamRecord;

/// Where an import came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportSource {
    File,
    Paste,
    Remote,
}

impl std::fmt::Display for ImportSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ImportSource::File => "file",
            ImportSource::Paste => "pasted text",
            ImportSource::Remote => "converted document",
        };
        f.write_str(label)
    }
}

/// Whether a remote conversion is outstanding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportState {
    #[default]
    Idle,
    Busy,
}

/// Tracks the one import allowed in flight at a time
#[derive(Debug, Default)]
pub struct ImportPipeline {
    state: ImportState,
}

impl ImportPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn state(&self) -> ImportState {
        self.state
    }

    /// Fail with `ImportBusy` while a conversion is pending
    pub fn ensure_idle(&self) -> Result<()> {
        match self.state {
            ImportState::Idle => Ok(()),
            ImportState::Busy => Err(CountdownError::ImportBusy),
        }
    }

    /// Build the conversion request and mark the pipeline busy until
    /// [`finish_remote`](Self::finish_remote) is called
    pub fn begin_remote(&mut self, bytes: &[u8], mime: &str) -> Result<ConversionRequest> {
        self.ensure_idle()?;
        let request = build_request(bytes, mime)?;
        self.state = ImportState::Busy;
        debug!(file_type = mime, "conversion pending");
        Ok(request)
    }

    /// Hand back the conversion outcome; the pipeline is idle again whatever it was
    pub fn finish_remote(&mut self, response: Result<String>) -> Result<Vec<ExamRecord>> {
        if self.state != ImportState::Busy {
            return Err(CountdownError::Remote(
                "no conversion is pending".to_string(),
            ));
        }
        self.state = ImportState::Idle;

        let body = response?;
        parse_pasted(interpret_response(&body)?)
    }
}

/// Parse the contents of a JSON file
pub fn parse_file_text(text: &str) -> Result<Vec<ExamRecord>> {
    let value = parse_json(text)?;
    Ok(validate_exams(&value)?)
}

/// Clean and parse pasted text
pub fn parse_pasted(text: &str) -> Result<Vec<ExamRecord>> {
    let cleaned = clean_pasted_json(text)?;
    let value = parse_json(&cleaned)?;
    Ok(validate_exams(&value)?)
}

fn parse_json(text: &str) -> Result<Value> {
    serde_json::from_str(text).map_err(|err| {
        CountdownError::Format(format!(
            "invalid JSON at line {}, column {}: {}",
            err.line(),
            err.column(),
            err
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"[
        {"code": "CS101", "name": "Intro", "date": "01.01.2030", "time": "09:00"},
        {"code": "MATH200", "name": "Calculus", "date": "15.12.2029", "time": "13:30", "classes": "B12"}
    ]"#;

    #[test]
    fn test_parse_file_text() {
        let exams = parse_file_text(VALID).unwrap();
        let codes: Vec<_> = exams.iter().map(|e| e.code.as_str()).collect();
        assert_eq!(codes, vec!["CS101", "MATH200"]);
    }

    #[test]
    fn test_parse_file_text_reports_json_position() {
        let err = parse_file_text("[{\"code\": }]").unwrap_err();
        assert!(err.to_string().contains("invalid JSON at line 1"));
    }

    #[test]
    fn test_parse_pasted_fenced() {
        let fenced = format!("```json\n{VALID}\n```");
        assert_eq!(parse_pasted(&fenced).unwrap(), parse_file_text(VALID).unwrap());
    }

    #[test]
    fn test_parse_pasted_rejects_shape_before_parsing() {
        let err = parse_pasted("not an array").unwrap_err();
        assert!(err.to_string().contains("must start with ["));
    }

    #[test]
    fn test_remote_round_trip() {
        let mut pipeline = ImportPipeline::new();
        let request = pipeline.begin_remote(b"%PDF-1.7", "application/pdf").unwrap();
        assert_eq!(request.file_type, "application/pdf");
        assert_eq!(pipeline.state(), ImportState::Busy);

        let exams = pipeline
            .finish_remote(Ok(format!("```json\n{VALID}\n```")))
            .unwrap();
        assert_eq!(exams.len(), 2);
        assert_eq!(pipeline.state(), ImportState::Idle);
    }

    #[test]
    fn test_second_import_rejected_while_busy() {
        let mut pipeline = ImportPipeline::new();
        pipeline.begin_remote(b"png", "image/png").unwrap();

        let err = pipeline.begin_remote(b"png", "image/png").unwrap_err();
        assert!(matches!(err, CountdownError::ImportBusy));
        assert!(matches!(
            pipeline.ensure_idle(),
            Err(CountdownError::ImportBusy)
        ));
    }

    #[test]
    fn test_error_token_and_transport_failure_release_busy() {
        let mut pipeline = ImportPipeline::new();
        pipeline.begin_remote(b"png", "image/png").unwrap();
        let err = pipeline.finish_remote(Ok("error".to_string())).unwrap_err();
        assert!(matches!(err, CountdownError::Remote(_)));
        assert_eq!(pipeline.state(), ImportState::Idle);

        pipeline.begin_remote(b"png", "image/png").unwrap();
        let err = pipeline
            .finish_remote(Err(CountdownError::Remote("unreachable".to_string())))
            .unwrap_err();
        assert!(err.to_string().contains("unreachable"));
        assert_eq!(pipeline.state(), ImportState::Idle);
    }

    #[test]
    fn test_unsupported_type_does_not_mark_busy() {
        let mut pipeline = ImportPipeline::new();
        assert!(pipeline.begin_remote(b"GIF89a", "image/gif").is_err());
        assert_eq!(pipeline.state(), ImportState::Idle);
    }

    #[test]
    fn test_finish_without_begin() {
        let mut pipeline = ImportPipeline::new();
        assert!(pipeline.finish_remote(Ok("[]".to_string())).is_err());
    }
}

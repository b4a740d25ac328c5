use std::path::Path;
use std::time::Duration;

use base64::engine::general_purpose;
use base64::Engine;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{CountdownError, Result};

/// File types the conversion service understands
pub const SUPPORTED_MIME_TYPES: [&str; 3] = ["image/png", "image/jpeg", "application/pdf"];

/// Body the conversion service answers with when it cannot read the schedule
pub const ERROR_TOKEN: &str = "error";

/// JSON body sent to the conversion service
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionRequest {
    /// Base64-encoded file contents
    pub file: String,
    /// Mime type of the encoded file
    #[serde(rename = "fileType")]
    pub file_type: String,
}

/// Turns a schedule document into exam-list JSON text
pub trait Converter {
    fn convert(&self, request: &ConversionRequest) -> Result<String>;
}

/// Guess the mime type from the file name, accepting only supported types
pub fn detect_mime(path: &Path) -> Result<&'static str> {
    let guessed = mime_guess::from_path(path).first();
    guessed
        .and_then(|mime| {
            SUPPORTED_MIME_TYPES
                .iter()
                .copied()
                .find(|supported| *supported == mime.essence_str())
        })
        .ok_or_else(unsupported_type)
}

/// Encode `bytes` for the conversion service
pub fn build_request(bytes: &[u8], mime: &str) -> Result<ConversionRequest> {
    if !SUPPORTED_MIME_TYPES.contains(&mime) {
        return Err(unsupported_type());
    }
    Ok(ConversionRequest {
        file: general_purpose::STANDARD.encode(bytes),
        file_type: mime.to_string(),
    })
}

/// Reject the service's error token; anything else is exam-list text
pub fn interpret_response(body: &str) -> Result<&str> {
    if body.trim() == ERROR_TOKEN {
        return Err(CountdownError::Remote(
            "The service could not process the file. Make sure it is a readable exam schedule."
                .to_string(),
        ));
    }
    Ok(body)
}

fn unsupported_type() -> CountdownError {
    CountdownError::Format("Unsupported file type. Use a PNG, JPEG, or PDF file.".to_string())
}

/// Converter backed by an HTTP endpoint
pub struct HttpConverter {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl HttpConverter {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
        })
    }
}

impl Converter for HttpConverter {
    fn convert(&self, request: &ConversionRequest) -> Result<String> {
        info!(endpoint = %self.endpoint, file_type = %request.file_type, "sending schedule for conversion");
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .and_then(|response| response.error_for_status())
            .map_err(|e| {
                CountdownError::Remote(format!("Could not reach the conversion service: {}", e))
            })?;

        let body = response.text().map_err(|e| {
            CountdownError::Remote(format!("Could not read the conversion response: {}", e))
        })?;
        debug!(bytes = body.len(), "received conversion response");
        Ok(body)
    }
}

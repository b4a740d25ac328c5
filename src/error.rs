use thiserror::Error;

/// Exam countdown error types
#[derive(Error, Debug)]
pub enum CountdownError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Read error: {0}")]
    Read(String),

    #[error("Format error: {0}")]
    Format(String),

    #[error("Storage error: {0}")]
    Store(String),

    #[error("Storage quota exceeded: {needed} bytes needed, {quota} bytes available")]
    QuotaExceeded { needed: usize, quota: usize },

    #[error("Conversion service error: {0}")]
    Remote(String),

    #[error("Another import is still in progress")]
    ImportBusy,

    #[error("Selection error: {0}")]
    Selection(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for exam countdown operations
pub type Result<T> = std::result::Result<T, CountdownError>;

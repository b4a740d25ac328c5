use std::fs;
use std::path::PathBuf;

use crate::cli::open_with_schedule;
use crate::error::Result;

/// Default file written by `export`
pub const DEFAULT_EXPORT_PATH: &str = "exams.csv";

/// Write the selected exams as calendar CSV
pub fn export(config_path: Option<PathBuf>, output: Option<PathBuf>) -> Result<()> {
    let (_, app) = open_with_schedule(config_path.as_deref())?;
    let csv = app.export_csv()?;

    let output = output.unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_PATH));
    if let Some(parent) = output.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(&output, &csv)?;

    let rows = csv.lines().count().saturating_sub(1);
    println!("Exported {} exam(s) to {}", rows, output.display());
    Ok(())
}

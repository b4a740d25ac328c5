//! Command-line interface module
//!
//! Implements all CLI commands using clap:
//! - config init: Initialize configuration file
//! - import file|paste|remote: Replace the exam schedule
//! - select: Choose which exams to track
//! - show / watch: Display countdowns once or live
//! - reset: Forget the schedule and selection
//! - export: Write the selected exams as calendar CSV
//! - prompt: Print the conversion prompt for chat tools
pub mod config;
pub mod export;
pub mod import;
pub mod prompt;
pub mod reset;
pub mod select;
pub mod show;

use std::path::Path;

use crate::app::App;
use crate::config::Config;
use crate::display::{SurfaceMode, TerminalSurface};
use crate::error::{CountdownError, Result};
use crate::store::{ExamStore, FileStore};

pub type CliApp = App<FileStore, TerminalSurface>;

/// Load the configuration and open the stored schedule
pub fn open_app(config_path: Option<&Path>, mode: SurfaceMode) -> Result<(Config, CliApp)> {
    let config = crate::config::load_or_default(config_path)?;
    let backend = FileStore::open(&config.storage.path, config.storage.quota_bytes)?;
    let app = App::new(
        ExamStore::new(backend),
        TerminalSurface::new(mode),
        config.display.tick_interval(),
    );
    Ok((config, app))
}

/// Open the app and load a schedule that must contain exams
pub fn open_with_schedule(config_path: Option<&Path>) -> Result<(Config, CliApp)> {
    let (config, mut app) = open_app(config_path, SurfaceMode::Snapshot)?;
    if !app.load()? {
        return Err(CountdownError::Selection(
            "No schedule loaded. Import one with 'exam-countdown import' first.".to_string(),
        ));
    }
    if app.catalog().is_empty() {
        return Err(CountdownError::Selection(
            "The imported schedule contains no exams. Import another schedule.".to_string(),
        ));
    }
    Ok((config, app))
}

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use crate::app::ImportOutcome;
use crate::cli::{open_app, select, CliApp};
use crate::display::SurfaceMode;
use crate::error::{CountdownError, Result};
use crate::import::HttpConverter;

/// Import a JSON file
pub fn file(config_path: Option<PathBuf>, path: PathBuf) -> Result<()> {
    let (_, mut app) = open_app(config_path.as_deref(), SurfaceMode::Snapshot)?;
    let outcome = app.import_file(&path)?;
    finish(&mut app, outcome, true)
}

/// Import pasted text given inline or on stdin
pub fn paste(config_path: Option<PathBuf>, text: Option<String>) -> Result<()> {
    let (_, mut app) = open_app(config_path.as_deref(), SurfaceMode::Snapshot)?;

    let (text, from_stdin) = match text {
        Some(text) => (text, false),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| CountdownError::Read(format!("Cannot read pasted text: {}", e)))?;
            (buffer, true)
        }
    };

    let outcome = app.import_pasted(&text)?;
    finish(&mut app, outcome, !from_stdin)
}

/// Convert a PNG, JPEG or PDF schedule through the configured service
pub fn remote(config_path: Option<PathBuf>, path: PathBuf) -> Result<()> {
    let (config, mut app) = open_app(config_path.as_deref(), SurfaceMode::Snapshot)?;
    let endpoint = config.remote.endpoint.as_deref().ok_or_else(|| {
        CountdownError::Config(
            "No conversion endpoint configured. Set 'endpoint' under [remote] in exam-countdown.toml."
                .to_string(),
        )
    })?;

    let converter = HttpConverter::new(endpoint, config.remote.timeout())?;
    println!("Converting {} ...", path.display());
    let outcome = app.import_remote(&converter, &path)?;
    finish(&mut app, outcome, true)
}

fn finish(app: &mut CliApp, outcome: ImportOutcome, may_prompt: bool) -> Result<()> {
    println!("Imported {} exam(s) from {}.", outcome.count, outcome.source);
    if outcome.count == 0 {
        println!("The schedule contains no exams.");
        return Ok(());
    }

    if may_prompt && io::stdin().is_terminal() {
        let mut prompt = outcome.prompt;
        let stdin = io::stdin();
        if let Some(chosen) = select::run_prompt(&mut prompt, stdin.lock(), io::stdout().lock())? {
            return select::commit(app, &chosen);
        }
    }

    println!("Run 'exam-countdown select' to choose which exams to track.");
    Ok(())
}

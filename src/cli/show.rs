use std::path::PathBuf;

use chrono::Local;
use tracing::debug;

use crate::app::Startup;
use crate::cli::open_app;
use crate::display::SurfaceMode;
use crate::error::Result;
use crate::scheduler::SchedulerState;

const SELECT_HINT: &str = "No exams chosen yet. Run 'exam-countdown select' to choose which exams to track.";

/// Print the countdowns once
pub fn show(config_path: Option<PathBuf>) -> Result<()> {
    let (_, mut app) = open_app(config_path.as_deref(), SurfaceMode::Snapshot)?;

    match app.initialize(Local::now())? {
        Startup::NeedsSelection(_) => println!("{}", SELECT_HINT),
        _ => app.surface().present(),
    }
    Ok(())
}

/// Keep the countdowns updated until interrupted or `ticks` updates have run
pub fn watch(config_path: Option<PathBuf>, ticks: Option<u64>) -> Result<()> {
    let (config, mut app) = open_app(config_path.as_deref(), SurfaceMode::Live)?;

    if let Startup::NeedsSelection(_) = app.initialize(Local::now())? {
        println!("{}", SELECT_HINT);
        return Ok(());
    }

    debug!(pending = app.display().pending(), "watching countdowns");
    let wait = config.display.tick_interval() * 2;
    let mut handled = 0u64;
    while ticks.is_none_or(|limit| handled < limit) {
        if app.scheduler_state() != SchedulerState::Active || app.display().pending() == 0 {
            debug!("nothing to count down, leaving watch");
            break;
        }
        let Some(tick) = app.next_tick(wait) else {
            continue;
        };
        if app.handle_tick(tick, Local::now())?.is_some() {
            handled += 1;
        }
    }
    Ok(())
}

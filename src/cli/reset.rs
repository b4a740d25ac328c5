use std::path::PathBuf;

use crate::cli::open_app;
use crate::display::SurfaceMode;
use crate::error::Result;

/// Forget the imported schedule and the selection
pub fn reset(config_path: Option<PathBuf>) -> Result<()> {
    let (_, mut app) = open_app(config_path.as_deref(), SurfaceMode::Snapshot)?;
    app.reset()?;

    println!("Schedule and selection cleared.");
    app.surface().present();
    Ok(())
}

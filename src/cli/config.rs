use crate::config::{self, Config, DEFAULT_CONFIG_PATH};
use crate::error::Result;
use std::path::PathBuf;

/// Initialize exam-countdown.toml configuration file
pub fn init(path: Option<PathBuf>) -> Result<()> {
    let config_path = path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    if config_path.exists() {
        eprintln!(
            "Configuration file already exists at: {}",
            config_path.display()
        );
        eprintln!("Remove it first if you want to reinitialize.");
        return Ok(());
    }

    let config = Config::default();
    config::save(&config, &config_path)?;

    println!("Configuration file created: {}", config_path.display());
    println!("\nNext steps:");
    println!(
        "1. Edit {} to set the storage path and, for document import, the conversion endpoint",
        config_path.display()
    );
    println!("2. Run 'exam-countdown import file <PATH>' to load your exam schedule");

    Ok(())
}

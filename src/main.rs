mod app;
mod cli;
mod config;
mod display;
mod error;
mod export;
mod import;
mod logging;
mod models;
mod prompt;
mod renderer;
mod scheduler;
mod selection;
mod store;
mod timefmt;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "exam-countdown")]
#[command(about = "Track countdowns to your upcoming exams", long_about = None)]
struct Cli {
    /// Path to config file (defaults to ./exam-countdown.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Configuration commands
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Replace the exam schedule
    Import {
        #[command(subcommand)]
        command: ImportCommands,
    },
    /// Choose which exams to track
    Select {
        /// Comma-separated exam codes to track
        #[arg(long, value_delimiter = ',', conflicts_with_all = ["all", "none"])]
        codes: Option<Vec<String>>,

        /// Track every exam in the schedule
        #[arg(long, conflicts_with = "none")]
        all: bool,

        /// Track no exams
        #[arg(long)]
        none: bool,
    },
    /// Print the countdowns once
    Show,
    /// Keep the countdowns updated in the terminal
    Watch {
        /// Stop after this many updates
        #[arg(long)]
        ticks: Option<u64>,
    },
    /// Forget the schedule and the selection
    Reset,
    /// Export the selected exams as calendar CSV
    Export {
        /// File to write (defaults to exams.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print a prompt that turns a schedule into importable JSON
    Prompt {
        /// Also copy the prompt to the clipboard
        #[arg(long)]
        copy: bool,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Initialize exam-countdown.toml configuration file
    Init {
        /// Path where to create the config file
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum ImportCommands {
    /// Import a JSON file
    File {
        /// JSON file holding the exam list
        path: PathBuf,
    },
    /// Import pasted JSON, optionally wrapped in a code fence
    Paste {
        /// Text to import (read from stdin when omitted)
        #[arg(long)]
        text: Option<String>,
    },
    /// Convert a PNG, JPEG or PDF schedule with the configured service
    Remote {
        /// Schedule document
        path: PathBuf,
    },
}

fn main() {
    logging::init();
    let cli = Cli::parse();
    let config = cli.config;

    let result = match cli.command {
        Commands::Config { command } => match command {
            ConfigCommands::Init { path } => cli::config::init(path),
        },
        Commands::Import { command } => match command {
            ImportCommands::File { path } => cli::import::file(config, path),
            ImportCommands::Paste { text } => cli::import::paste(config, text),
            ImportCommands::Remote { path } => cli::import::remote(config, path),
        },
        Commands::Select { codes, all, none } => cli::select::run(config, codes, all, none),
        Commands::Show => cli::show::show(config),
        Commands::Watch { ticks } => cli::show::watch(config, ticks),
        Commands::Reset => cli::reset::reset(config),
        Commands::Export { output } => cli::export::export(config, output),
        Commands::Prompt { copy } => cli::prompt::prompt(copy),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

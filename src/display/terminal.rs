//! TTY detection and color support logic

use std::io::{IsTerminal, Write};

use termimad::crossterm::{cursor, execute, terminal};

/// Determine if colors should be used based on environment and TTY status
pub fn should_use_colors() -> bool {
    // NO_COLOR wins over everything (https://no-color.org/)
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    // CLICOLOR_FORCE enables colors even when piped
    if let Ok(val) = std::env::var("CLICOLOR_FORCE") {
        if val != "0" {
            return true;
        }
    }

    if let Ok(val) = std::env::var("CLICOLOR") {
        if val == "0" {
            return false;
        }
    }

    std::io::stdout().is_terminal()
}

/// Whether stdout is a terminal that can be repainted in place
pub fn is_interactive() -> bool {
    std::io::stdout().is_terminal()
}

/// Clear the terminal and move the cursor home
pub fn clear_screen() -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    execute!(
        stdout,
        terminal::Clear(terminal::ClearType::All),
        cursor::MoveTo(0, 0)
    )?;
    stdout.flush()
}

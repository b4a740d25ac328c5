use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use chrono::Local;

use crate::cli::{open_with_schedule, CliApp};
use crate::error::{CountdownError, Result};
use crate::models::Selection;
use crate::selection::SelectionPrompt;

/// Choose which exams to track, from flags or interactively
pub fn run(
    config_path: Option<PathBuf>,
    codes: Option<Vec<String>>,
    all: bool,
    none: bool,
) -> Result<()> {
    let (_, mut app) = open_with_schedule(config_path.as_deref())?;
    let mut prompt = app.present_selection()?;

    let chosen = if all {
        prompt.set_all(true);
        prompt.chosen()
    } else if none {
        Selection::default()
    } else if let Some(codes) = codes {
        apply_codes(&mut prompt, &codes)?
    } else {
        let stdin = io::stdin();
        let stdout = io::stdout();
        match run_prompt(&mut prompt, stdin.lock(), stdout.lock())? {
            Some(chosen) => chosen,
            None => {
                println!("Selection unchanged.");
                return Ok(());
            }
        }
    };

    commit(&mut app, &chosen)
}

/// Save the selection and print the countdowns it produces
pub fn commit(app: &mut CliApp, chosen: &Selection) -> Result<()> {
    app.commit_selection(chosen, Local::now())?;
    println!("Tracking {} exam(s).\n", chosen.len());
    app.surface().present();
    Ok(())
}

/// Check exactly `codes`; unknown codes are an error
fn apply_codes(prompt: &mut SelectionPrompt, codes: &[String]) -> Result<Selection> {
    prompt.set_all(false);
    for code in codes.iter().map(|code| code.trim()).filter(|code| !code.is_empty()) {
        if !prompt.set_checked(code, true) {
            return Err(CountdownError::Selection(format!(
                "Unknown exam code '{}'",
                code
            )));
        }
    }
    Ok(prompt.chosen())
}

/// Numbered checklist on a line-based terminal.
///
/// Returns `None` when the user cancels or input ends.
pub fn run_prompt<R, W>(
    prompt: &mut SelectionPrompt,
    mut input: R,
    mut output: W,
) -> Result<Option<Selection>>
where
    R: BufRead,
    W: Write,
{
    loop {
        write_checklist(prompt, &mut output)?;
        writeln!(
            output,
            "Toggle exams by number, 'all' or 'none'. Press Enter to save, 'q' to cancel."
        )?;
        write!(output, "> ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            return Ok(None);
        }

        match line.trim() {
            "" | "done" => return Ok(Some(prompt.chosen())),
            "q" | "quit" => return Ok(None),
            "all" => prompt.set_all(true),
            "none" => prompt.set_all(false),
            other => {
                let tokens = other
                    .split(|c: char| c == ',' || c.is_whitespace())
                    .filter(|token| !token.is_empty());
                for token in tokens {
                    match token.parse::<usize>() {
                        Ok(number) if number >= 1 && prompt.toggle(number - 1) => {}
                        _ => writeln!(output, "No exam numbered '{}'", token)?,
                    }
                }
            }
        }
    }
}

fn write_checklist<W: Write>(prompt: &SelectionPrompt, output: &mut W) -> io::Result<()> {
    let mark = |checked: bool| if checked { 'x' } else { ' ' };

    writeln!(output, "\nSelect the exams to track:")?;
    writeln!(output, "  [{}]     Select all", mark(prompt.all_checked()))?;
    for (index, entry) in prompt.entries().iter().enumerate() {
        writeln!(
            output,
            "  [{}] {:>3}. {}",
            mark(entry.checked),
            index + 1,
            entry.label
        )?;
    }
    Ok(())
}

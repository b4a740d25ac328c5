use crate::error::Result;
use crate::prompt::{copy_to_clipboard, PROMPT_TEMPLATE};

/// Print the conversion prompt, optionally copying it to the clipboard
pub fn prompt(copy: bool) -> Result<()> {
    println!("{}", PROMPT_TEMPLATE);

    if copy {
        if copy_to_clipboard(PROMPT_TEMPLATE) {
            eprintln!("Prompt copied to clipboard.");
        } else {
            eprintln!("Could not copy the prompt. Copy the text above manually and try again.");
        }
    }
    Ok(())
}

//! Prompt template for chat tools
//!
//! Users hand this text, together with their schedule, to a text-generation
//! tool and paste the answer back with `import paste`.

use tracing::warn;

pub const PROMPT_TEMPLATE: &str = r#"Convert the exam schedule I give you into a JSON array. Reply with the JSON array only, no explanations.

Each exam must be one object with exactly these fields, all strings:
- "code": the course code, unique for every exam (for example "CS101")
- "name": the course name, or "" if there is none
- "date": the exam date as DD.MM.YYYY (for example "01.01.2030")
- "time": the start time as HH:MM in 24-hour format (for example "09:00")
- "classes": optional, the rooms or class groups as a single string

Example:
[
  {"code": "CS101", "name": "Introduction to Programming", "date": "01.01.2030", "time": "09:00", "classes": "A101, A102"},
  {"code": "MATH200", "name": "Calculus II", "date": "03.01.2030", "time": "13:30"}
]

Here is my schedule:
"#;

/// Put `text` on the system clipboard; failures are logged, not raised
pub fn copy_to_clipboard(text: &str) -> bool {
    let result = arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text));
    match result {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "could not copy prompt to clipboard");
            false
        }
    }
}

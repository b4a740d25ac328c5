use tracing::debug;

use crate::error::{CountdownError, Result};

const FENCE: &str = "```";

/// Strip the wrappers chat tools put around JSON and check it looks like an array.
///
/// At most one of the fence/backtick wrappers is removed, then a single
/// leading backslash. The result must start with `[` and end with `]`.
pub fn clean_pasted_json(raw: &str) -> Result<String> {
    let mut text = raw.trim();
    if text.is_empty() {
        return Err(CountdownError::Format(
            "Nothing to import: paste the JSON data first".to_string(),
        ));
    }

    if let Some(inner) = strip_tagged_fence(text) {
        debug!("removing tagged code fence");
        text = inner.trim();
    } else if let Some(inner) = strip_wrapper(text, FENCE) {
        debug!("removing code fence");
        text = inner.trim();
    } else if let Some(inner) = strip_wrapper(text, "`") {
        debug!("removing backticks");
        text = inner.trim();
    }

    if let Some(inner) = text.strip_prefix('\\') {
        debug!("removing leading backslash");
        text = inner;
    }

    if !text.starts_with('[') || !text.ends_with(']') {
        return Err(CountdownError::Format(
            "The pasted text does not look like a JSON array (it must start with [ and end with ])"
                .to_string(),
        ));
    }

    Ok(text.to_string())
}

fn strip_wrapper<'a>(text: &'a str, wrapper: &str) -> Option<&'a str> {
    text.strip_prefix(wrapper)?.strip_suffix(wrapper)
}

/// A fence whose opening line carries a language tag, e.g. ```json
fn strip_tagged_fence(text: &str) -> Option<&str> {
    let inner = strip_wrapper(text, FENCE)?;
    let tag_len = inner
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '-'))
        .unwrap_or(inner.len());
    (tag_len > 0).then(|| &inner[tag_len..])
}

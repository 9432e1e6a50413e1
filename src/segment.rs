//! Splits raw transcript text into trimmed, non-empty lines.

use crate::error::{Result, TranscriptError};

/// Returns the non-empty lines of `text`, trimmed, in document order.
///
/// # Errors
///
/// Returns [`TranscriptError::EmptyInput`] if `text` holds nothing but whitespace.
pub fn segment(text: &str) -> Result<Vec<&str>> {
    if text.trim().is_empty() {
        return Err(TranscriptError::EmptyInput);
    }

    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect())
}

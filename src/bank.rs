//! Question bank loading, parsing and sampling.
//!
//! Banks are plain text files, one per category, re-read on every request so
//! edits on disk take effect immediately. Parsing precedence: a file that
//! contains the explicit delimiter is split strictly on it (multi-paragraph
//! questions stay intact); otherwise blank lines separate questions.

use std::path::Path;

use rand::Rng;
use tracing::error;

use crate::domain::Category;
use crate::error::ApiError;

/// Reserved token separating questions in bank files.
pub const QUESTION_DELIMITER: &str = "===QUESTION===";

/// Split bank content into trimmed, non-empty question units.
pub fn parse_units(content: &str) -> Vec<String> {
  if content.contains(QUESTION_DELIMITER) {
    content
      .split(QUESTION_DELIMITER)
      .map(str::trim)
      .filter(|u| !u.is_empty())
      .map(str::to_string)
      .collect()
  } else {
    split_on_blank_lines(content)
  }
}

// Two-or-more consecutive line breaks end a unit. Runs of blank lines leave
// leading newlines on the next chunk; trimming removes them.
fn split_on_blank_lines(content: &str) -> Vec<String> {
  let normalized = content.replace("\r\n", "\n");
  normalized
    .split("\n\n")
    .map(str::trim)
    .filter(|u| !u.is_empty())
    .map(str::to_string)
    .collect()
}

/// Read and parse a category's bank file. Repeated loads of the same file are
/// idempotent. Read failures are logged here (the caller only sees a generic
/// storage error).
pub fn load_units(dir: &Path, category: Category) -> Result<Vec<String>, ApiError> {
  let path = dir.join(category.file_name());
  let content = std::fs::read_to_string(&path).map_err(|e| {
    error!(target: "bank", %category, path = %path.display(), error = %e, "Failed to read question bank");
    ApiError::StorageUnavailable
  })?;
  Ok(parse_units(&content))
}

/// Uniform random pick over the parsed units with the caller's rng.
pub fn sample_question<'a, R: Rng + ?Sized>(units: &'a [String], rng: &mut R) -> Option<&'a str> {
  if units.is_empty() {
    None
  } else {
    Some(units[rng.gen_range(0..units.len())].as_str())
  }
}

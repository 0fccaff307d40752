//! Path extraction and classification.
//!
//! `extract_paths` is purely lexical: it pulls substrings that look
//! like Unix or Windows paths out of arbitrary text. `classify` then
//! checks candidates against a working directory on the real
//! filesystem.

use std::path::Path;

use regex::Regex;
use tracing::warn;

/// Unix-like paths (leading `./`, `../`, `/`, or an internal `/` with
/// non-whitespace on both sides) and Windows drive paths, combined.
const PATH_PATTERN: &str =
    r"\.{1,2}/\S+|/\S+|\b\S+/\S+\b|[a-zA-Z]:\\(?:[^\\\s,]+\\?)*[^\\\s,]+";

/// Extract path-looking substrings from `text`.
///
/// Matches are returned in order of first appearance, duplicates
/// preserved. Extraction fails soft: if the pattern cannot be built,
/// a warning is logged and the result is empty rather than an error.
pub fn extract_paths(text: &str) -> Vec<String> {
    let pattern = match Regex::new(PATH_PATTERN) {
        Ok(pattern) => pattern,
        Err(e) => {
            warn!(error = %e, "failed to extract paths");
            return Vec::new();
        }
    };

    pattern
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Partition candidates into existing directories and existing files,
/// resolved relative to `cwd`.
///
/// Candidates that do not exist appear in neither output; filesystem
/// errors other than not-found (permission denied, …) count as not
/// existing. Input order is preserved and the original candidate
/// strings are returned, not the resolved paths.
pub fn classify(paths: &[String], cwd: &Path) -> (Vec<String>, Vec<String>) {
    let mut valid_dirs = Vec::new();
    let mut valid_files = Vec::new();

    for candidate in paths {
        let resolved = cwd.join(candidate);
        if resolved.is_dir() {
            valid_dirs.push(candidate.clone());
        } else if resolved.exists() {
            valid_files.push(candidate.clone());
        }
    }

    (valid_dirs, valid_files)
}

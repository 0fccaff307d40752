//! Contextual information gathered alongside the buffer: working
//! directory listing and a bounded tail of the zsh history file.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

/// Number of history lines sent as context.
pub const HISTORY_TAIL_LINES: usize = 1000;

/// Width of the extended-history metadata field (`: 1700000000:0;`)
/// stripped from the front of each history line.
const HISTORY_FIELD_WIDTH: usize = 15;

const HISTORY_FILE_NAME: &str = ".zsh_history";

/// Ambient shell state captured once at startup and passed into the
/// engine; the core never consults the environment itself.
#[derive(Debug, Clone)]
pub struct ShellContext {
    pub cwd: String,
    pub home: Option<PathBuf>,
}

impl ShellContext {
    pub fn new(cwd: impl Into<String>, home: Option<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            home,
        }
    }

    /// Entry names of the working directory, in directory order.
    ///
    /// An unreadable or missing directory yields an empty listing; the
    /// completion still goes out, just with less context.
    pub fn directory_listing(&self) -> Vec<String> {
        let entries = match fs::read_dir(&self.cwd) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(cwd = %self.cwd, error = %e, "could not list working directory");
                return Vec::new();
            }
        };
        entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect()
    }

    /// Last [`HISTORY_TAIL_LINES`] lines of `~/.zsh_history`, with the
    /// fixed-width metadata field stripped from each line.
    ///
    /// The file is read lossily since zsh writes raw bytes for
    /// multibyte input. Missing home or history file yields an empty
    /// tail.
    pub fn history_tail(&self) -> String {
        let Some(home) = &self.home else {
            debug!("no home directory, skipping history context");
            return String::new();
        };
        let path = home.join(HISTORY_FILE_NAME);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "could not read history file");
                return String::new();
            }
        };
        let text = String::from_utf8_lossy(&bytes);
        let lines: Vec<&str> = text.split('\n').collect();
        let start = lines.len().saturating_sub(HISTORY_TAIL_LINES);
        lines[start..]
            .iter()
            .map(|line| strip_history_field(line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Drop the first [`HISTORY_FIELD_WIDTH`] characters of a history line.
fn strip_history_field(line: &str) -> &str {
    match line.char_indices().nth(HISTORY_FIELD_WIDTH) {
        Some((idx, _)) => &line[idx..],
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn strips_extended_history_field() {
        assert_eq!(strip_history_field(": 1700000000:0;ls -la"), "ls -la");
    }

    #[test]
    fn short_line_strips_to_empty() {
        assert_eq!(strip_history_field("short"), "");
    }

    #[test]
    fn listing_of_missing_directory_is_empty() {
        let context = ShellContext::new("/nonexistent/cmdpilot-test", None);
        assert!(context.directory_listing().is_empty());
    }

    #[test]
    fn listing_contains_created_entries() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.txt"), b"x").unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();

        let context = ShellContext::new(dir.path().to_string_lossy(), None);
        let mut listing = context.directory_listing();
        listing.sort();
        assert_eq!(listing, vec!["a.txt".to_string(), "sub".to_string()]);
    }

    #[test]
    fn history_tail_bounded_and_stripped() {
        let home = TempDir::new().unwrap();
        let mut file = std::fs::File::create(home.path().join(HISTORY_FILE_NAME)).unwrap();
        for i in 0..(HISTORY_TAIL_LINES + 50) {
            writeln!(file, ": 1700000000:0;echo {}", i).unwrap();
        }
        drop(file);

        let context = ShellContext::new("/tmp", Some(home.path().to_path_buf()));
        let tail = context.history_tail();
        let lines: Vec<&str> = tail.split('\n').collect();
        assert_eq!(lines.len(), HISTORY_TAIL_LINES);
        assert!(lines[0].starts_with("echo "));
        assert!(!tail.contains(": 1700000000"));
    }

    #[test]
    fn missing_history_file_yields_empty_tail() {
        let home = TempDir::new().unwrap();
        let context = ShellContext::new("/tmp", Some(home.path().to_path_buf()));
        assert_eq!(context.history_tail(), "");
    }
}

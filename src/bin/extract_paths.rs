//! cmdpilot-paths binary: pull path substrings out of text, optionally
//! classifying them against a working directory.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use cmdpilot::core::{classify, extract_paths};

/// Extract filesystem path substrings from text.
#[derive(Debug, Parser)]
#[command(name = "cmdpilot-paths", version, about)]
struct Args {
    /// Text to scan for path-like substrings.
    text: String,

    /// Classify candidates into valid directories and files relative
    /// to this directory.
    #[arg(long)]
    cwd: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let paths = extract_paths(&args.text);
    for path in &paths {
        println!("{path}");
    }

    if let Some(cwd) = args.cwd {
        let (valid_dirs, valid_files) = classify(&paths, &cwd);
        println!("valid dirs: {}", valid_dirs.join(", "));
        println!("valid files: {}", valid_files.join(", "));
    }

    Ok(())
}

//! cmdpilot binary: one buffer in on stdin, one completion out on stdout.

use std::io::{self, Read, Write};

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::prelude::*;

use cmdpilot::config::{self, EnvOverrides};
use cmdpilot::core::{complete, ShellContext};
use cmdpilot::spi::{create_provider, Backend};

/// Generate command completions using an LLM backend.
#[derive(Debug, Parser)]
#[command(name = "cmdpilot", version, about)]
struct Args {
    /// Backend API to use.
    #[arg(long = "api", value_enum, default_value_t = Backend::Openai)]
    api: Backend,

    /// Cursor position in the input buffer.
    cursor_position: usize,

    /// Current working directory of the invoking shell.
    #[arg(long, default_value = "")]
    cwd: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    // Diagnostics go to stderr so stdout stays clean for the completion
    // text the line editor inserts. Honors RUST_LOG, default: warnings.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = Args::parse();
    let env = EnvOverrides::from_env();

    // Missing rc file: a template is written and the error tells the
    // user to fill it in. One-time bootstrap, exits non-zero.
    let settings = config::load(args.api, &env)?;
    let provider = create_provider(settings)?;

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    let context = ShellContext::new(args.cwd, dirs::home_dir());
    let completion = complete(provider.as_ref(), &buffer, args.cursor_position, &context).await?;

    let mut stdout = io::stdout();
    stdout.write_all(completion.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

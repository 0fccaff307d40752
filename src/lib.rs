//! cmdpilot: LLM-backed completion helper for the zsh line editor.
//!
//! The `cmdpilot` binary reads a partially typed command from stdin,
//! sends it with lightweight context (cwd listing, history tail) to a
//! remote backend, and prints the reconciled completion for the shell
//! to insert at the cursor. `cmdpilot-paths` extracts path substrings
//! from text and classifies them against a working directory.
//!
//! # Layering
//!
//! ```text
//! lib.rs   - facade: re-exports
//! core/    - engine, reconciliation, path extraction, context
//! api/     - request/response types, errors
//! spi/     - CompletionProvider trait + OpenAI/Gemini implementations
//! config   - rc files, env overrides, template bootstrap
//! ```

pub mod api;
pub mod config;
pub mod core;
pub mod spi;

pub use crate::api::{CompletionRequest, CompletionResponse, PilotError, PilotResult, Role, Segment};
pub use crate::config::{BackendSettings, EnvOverrides};
pub use crate::core::{classify, complete, extract_paths, reconcile, split_buffer, ShellContext};
pub use crate::spi::{create_provider, Backend, CompletionProvider};

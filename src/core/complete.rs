//! Completion engine: payload assembly, the single provider call, and
//! reconciliation of the reply.

use tracing::debug;

use crate::api::{CompletionRequest, PilotResult, Segment};
use crate::core::context::ShellContext;
use crate::core::prompt::{self, SCRIPT_MARKER};
use crate::core::reconcile::{reconcile, split_buffer};
use crate::spi::CompletionProvider;

/// Complete the buffer at `cursor` through `provider`.
///
/// Builds the role-tagged request (marker + buffer as primary content,
/// plus auxiliary context segments when the provider opts in), invokes
/// the provider exactly once, and reconciles the reply against the
/// buffer. Provider failures propagate untouched — no retry, no
/// partial result.
pub async fn complete(
    provider: &dyn CompletionProvider,
    buffer: &str,
    cursor: usize,
    context: &ShellContext,
) -> PilotResult<String> {
    let (prefix, suffix) = split_buffer(buffer, cursor);
    let full_command = format!("{SCRIPT_MARKER}{prefix}{suffix}");

    let mut segments = vec![
        Segment::system(prompt::completion_system_prompt()),
        Segment::user(full_command),
    ];
    if provider.wants_context_notes() {
        segments.push(Segment::system(prompt::context_preamble()));
        segments.push(Segment::system(format!(
            "ls: \n{}",
            context.directory_listing().join("\n")
        )));
        segments.push(Segment::system(format!("pwd: \n{}", context.cwd)));
        segments.push(Segment::system(format!(
            ".zsh_history: \n{}",
            context.history_tail()
        )));
    }

    let mut request = CompletionRequest::new(provider.model(), segments);
    if let Some(temperature) = provider.temperature() {
        request = request.with_temperature(temperature);
    }

    debug!(
        provider = provider.name(),
        model = %request.model,
        segments = request.segments.len(),
        "requesting completion"
    );

    let response = provider.complete(&request).await?;
    Ok(reconcile(&response.content, prefix, suffix))
}

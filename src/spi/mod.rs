//! SPI layer: the provider contract and its concrete implementations.
//!
//! Each backend sits behind its own cargo feature (`openai`, `gemini`,
//! both on by default). Selecting a backend whose feature was compiled
//! out is a configuration error surfaced by [`create_provider`], not a
//! scattered runtime check.

#[cfg(feature = "gemini")]
mod gemini;
#[cfg(any(test, feature = "testing"))]
pub mod mock;
#[cfg(feature = "openai")]
mod openai;

#[cfg(feature = "gemini")]
pub use gemini::GeminiProvider;
#[cfg(feature = "openai")]
pub use openai::OpenAiProvider;

use async_trait::async_trait;
use clap::ValueEnum;

use crate::api::{CompletionRequest, CompletionResponse, PilotError, PilotResult};
use crate::config::BackendSettings;

/// The supported remote backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    Openai,
    Gemini,
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Openai => "openai",
            Backend::Gemini => "gemini",
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A remote text-generation backend.
///
/// Implementations must be `Send + Sync`. A provider is invoked exactly
/// once per process run; there is no retry, streaming or cancellation.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Stable provider identifier (e.g. "openai").
    fn name(&self) -> &str;

    /// The model this provider was configured with.
    fn model(&self) -> &str;

    /// Sampling temperature to request, if the backend takes one.
    fn temperature(&self) -> Option<f32> {
        None
    }

    /// Whether the engine should append auxiliary context segments
    /// (cwd listing, cwd, history tail) to the request.
    fn wants_context_notes(&self) -> bool;

    /// Send one completion request and return the raw reply.
    async fn complete(&self, request: &CompletionRequest) -> PilotResult<CompletionResponse>;
}

/// Build the provider for the loaded backend settings.
///
/// # Errors
///
/// `Configuration` when the selected backend was disabled at compile
/// time, or when the HTTP client cannot be constructed.
pub fn create_provider(settings: BackendSettings) -> PilotResult<Box<dyn CompletionProvider>> {
    match settings {
        #[cfg(feature = "openai")]
        BackendSettings::OpenAi(settings) => Ok(Box::new(OpenAiProvider::new(settings)?)),
        #[cfg(feature = "gemini")]
        BackendSettings::Gemini(settings) => Ok(Box::new(GeminiProvider::new(settings)?)),
        #[allow(unreachable_patterns)]
        other => Err(PilotError::Configuration(format!(
            "backend '{}' was not compiled into this build; \
             rebuild with the matching cargo feature enabled",
            match other {
                BackendSettings::OpenAi(_) => "openai",
                BackendSettings::Gemini(_) => "gemini",
            }
        ))),
    }
}

/// Map an HTTP error status to a `PilotError`, shared by the providers.
pub(crate) fn map_status(provider: &str, status: reqwest::StatusCode, body: &str) -> PilotError {
    match status.as_u16() {
        401 | 403 => PilotError::AuthenticationFailed(body.to_string()),
        429 => PilotError::RateLimited,
        400 => PilotError::InvalidRequest(body.to_string()),
        500..=599 => PilotError::ProviderError {
            provider: provider.to_string(),
            message: body.to_string(),
        },
        _ => PilotError::NetworkError(format!("HTTP {}: {}", status, body)),
    }
}

use thiserror::Error;

/// Errors surfaced by the completion engine and its providers.
#[derive(Debug, Error)]
pub enum PilotError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Rate limited by provider")]
    RateLimited,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Provider error ({provider}): {message}")]
    ProviderError { provider: String, message: String },

    #[error("Empty reply from provider {0}")]
    EmptyReply(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

pub type PilotResult<T> = Result<T, PilotError>;

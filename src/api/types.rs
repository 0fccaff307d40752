/// Request/response types shared by the engine and the providers.

/// Role of a request segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    System,
    User,
}

/// One role-tagged text segment of a completion request.
#[derive(Debug, Clone)]
pub struct Segment {
    pub role: Role,
    pub content: String,
}

impl Segment {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// An ordered sequence of segments sent to a provider as one unit.
///
/// Immutable once constructed; the engine builds it, the provider
/// serializes it into its own wire format.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub model: String,
    pub segments: Vec<Segment>,
    pub temperature: Option<f32>,
}

impl CompletionRequest {
    pub fn new(model: impl Into<String>, segments: Vec<Segment>) -> Self {
        Self {
            model: model.into(),
            segments,
            temperature: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// The untouched text returned by a provider for one request.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    pub content: String,
    pub model: String,
}

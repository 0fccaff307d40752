//! Scripted provider for tests.

use std::sync::Mutex;

use async_trait::async_trait;

use super::CompletionProvider;
use crate::api::{CompletionRequest, CompletionResponse, PilotError, PilotResult};

/// Provider that returns a canned reply and records every request.
pub struct MockProvider {
    reply: Result<String, String>,
    wants_context_notes: bool,
    pub requests: Mutex<Vec<CompletionRequest>>,
}

impl MockProvider {
    /// Provider that replies with `reply` on every call.
    pub fn scripted(reply: impl Into<String>) -> Self {
        Self {
            reply: Ok(reply.into()),
            wants_context_notes: false,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Provider that fails every call with a provider error.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            reply: Err(message.into()),
            wants_context_notes: false,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_context_notes(mut self) -> Self {
        self.wants_context_notes = true;
        self
    }

    /// Requests seen so far, oldest first.
    pub fn recorded(&self) -> Vec<CompletionRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl CompletionProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn model(&self) -> &str {
        "mock-model"
    }

    fn wants_context_notes(&self) -> bool {
        self.wants_context_notes
    }

    async fn complete(&self, request: &CompletionRequest) -> PilotResult<CompletionResponse> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }
        match &self.reply {
            Ok(content) => Ok(CompletionResponse {
                content: content.clone(),
                model: request.model.clone(),
            }),
            Err(message) => Err(PilotError::ProviderError {
                provider: "mock".to_string(),
                message: message.clone(),
            }),
        }
    }
}

//! OpenAI chat-completions provider.

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{map_status, CompletionProvider};
use crate::api::{CompletionRequest, CompletionResponse, PilotError, PilotResult, Role, Segment};
use crate::config::OpenAiSettings;

/// Provider backed by the OpenAI `/chat/completions` endpoint.
#[derive(Debug)]
pub struct OpenAiProvider {
    client: Client,
    settings: OpenAiSettings,
}

impl OpenAiProvider {
    pub fn new(settings: OpenAiSettings) -> PilotResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| PilotError::Configuration(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, settings })
    }

    fn convert_segments(&self, segments: &[Segment]) -> Vec<OpenAiMessage> {
        segments
            .iter()
            .map(|segment| OpenAiMessage {
                role: match segment.role {
                    Role::System => "system",
                    Role::User => "user",
                },
                content: segment.content.clone(),
            })
            .collect()
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.settings.model
    }

    fn temperature(&self) -> Option<f32> {
        Some(self.settings.temperature)
    }

    fn wants_context_notes(&self) -> bool {
        true
    }

    async fn complete(&self, request: &CompletionRequest) -> PilotResult<CompletionResponse> {
        debug!(model = %request.model, "OpenAI complete");

        let body = OpenAiRequest {
            model: request.model.clone(),
            messages: self.convert_segments(&request.segments),
            temperature: request.temperature,
        };

        let url = format!("{}/chat/completions", self.settings.api_base);
        let mut http_request = self
            .client
            .post(&url)
            .header(
                header::AUTHORIZATION,
                format!("Bearer {}", self.settings.secret_key),
            )
            .header(header::CONTENT_TYPE, "application/json")
            .json(&body);
        if let Some(org) = &self.settings.organization {
            http_request = http_request.header("OpenAI-Organization", org);
        }

        let response = http_request
            .send()
            .await
            .map_err(|e| PilotError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_status("openai", status, &body));
        }

        let reply: OpenAiResponse = response
            .json()
            .await
            .map_err(|e| PilotError::SerializationError(e.to_string()))?;

        let content = reply
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| PilotError::EmptyReply("openai".to_string()))?;

        Ok(CompletionResponse {
            content,
            model: request.model.clone(),
        })
    }
}

// OpenAI wire types

#[derive(Debug, Serialize)]
struct OpenAiRequest {
    model: String,
    messages: Vec<OpenAiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct OpenAiMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponseMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> OpenAiSettings {
        OpenAiSettings {
            secret_key: "sk-test".to_string(),
            api_base: "https://api.openai.com/v1".to_string(),
            organization: None,
            model: "gpt-4o-mini".to_string(),
            temperature: 1.0,
        }
    }

    #[test]
    fn segments_map_to_wire_roles() {
        let provider = OpenAiProvider::new(settings()).unwrap();
        let messages = provider.convert_segments(&[
            Segment::system("instructions"),
            Segment::user("#!/bin/zsh\n\nls"),
            Segment::system("pwd: \n/tmp"),
        ]);

        let roles: Vec<&str> = messages.iter().map(|m| m.role).collect();
        assert_eq!(roles, vec!["system", "user", "system"]);
        assert_eq!(messages[1].content, "#!/bin/zsh\n\nls");
    }

    #[test]
    fn provider_reports_configured_model_and_temperature() {
        let provider = OpenAiProvider::new(settings()).unwrap();
        assert_eq!(provider.name(), "openai");
        assert_eq!(provider.model(), "gpt-4o-mini");
        assert_eq!(provider.temperature(), Some(1.0));
        assert!(provider.wants_context_notes());
    }

    #[test]
    fn request_body_omits_unset_temperature() {
        let body = OpenAiRequest {
            model: "gpt-4o-mini".to_string(),
            messages: vec![],
            temperature: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("temperature").is_none());
    }
}

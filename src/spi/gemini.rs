//! Google Gemini provider.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{map_status, CompletionProvider};
use crate::api::{CompletionRequest, CompletionResponse, PilotError, PilotResult, Role, Segment};
use crate::config::GeminiSettings;

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Provider backed by the Gemini `generateContent` endpoint.
#[derive(Debug)]
pub struct GeminiProvider {
    client: Client,
    settings: GeminiSettings,
}

impl GeminiProvider {
    pub fn new(settings: GeminiSettings) -> PilotResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| PilotError::Configuration(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, settings })
    }

    /// Split segments into a system instruction and user contents.
    ///
    /// Gemini carries system text in a dedicated `systemInstruction`
    /// field; multiple system segments are joined with blank lines.
    fn convert_segments(&self, segments: &[Segment]) -> (Option<String>, Vec<GeminiContent>) {
        let mut system_parts = Vec::new();
        let mut contents = Vec::new();

        for segment in segments {
            match segment.role {
                Role::System => system_parts.push(segment.content.clone()),
                Role::User => contents.push(GeminiContent {
                    role: "user",
                    parts: vec![GeminiPart {
                        text: segment.content.clone(),
                    }],
                }),
            }
        }

        let instruction = if system_parts.is_empty() {
            None
        } else {
            Some(system_parts.join("\n\n"))
        };
        (instruction, contents)
    }
}

#[async_trait]
impl CompletionProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.settings.model
    }

    fn wants_context_notes(&self) -> bool {
        false
    }

    async fn complete(&self, request: &CompletionRequest) -> PilotResult<CompletionResponse> {
        debug!(model = %request.model, "Gemini complete");

        let (system_instruction, contents) = self.convert_segments(&request.segments);
        let body = GeminiRequest {
            contents,
            system_instruction: system_instruction.map(|text| GeminiSystemInstruction {
                parts: vec![GeminiPart { text }],
            }),
        };

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            BASE_URL, request.model, self.settings.api_key
        );

        let response = self
            .client
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| PilotError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_status("gemini", status, &body));
        }

        let reply: GeminiResponse = response
            .json()
            .await
            .map_err(|e| PilotError::SerializationError(e.to_string()))?;

        let content = reply
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or_else(|| PilotError::EmptyReply("gemini".to_string()))?;

        Ok(CompletionResponse {
            content,
            model: request.model.clone(),
        })
    }
}

// Gemini wire types

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "systemInstruction", skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiSystemInstruction>,
}

#[derive(Debug, Serialize)]
struct GeminiSystemInstruction {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    role: &'static str,
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiCandidateContent,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> GeminiProvider {
        GeminiProvider::new(GeminiSettings {
            api_key: "k".to_string(),
            model: "gemini-1.5-pro-latest".to_string(),
        })
        .unwrap()
    }

    #[test]
    fn system_segments_become_one_instruction() {
        let (instruction, contents) = provider().convert_segments(&[
            Segment::system("first"),
            Segment::user("ls"),
            Segment::system("second"),
        ]);
        assert_eq!(instruction.as_deref(), Some("first\n\nsecond"));
        assert_eq!(contents.len(), 1);
        assert_eq!(contents[0].parts[0].text, "ls");
    }

    #[test]
    fn no_system_segments_means_no_instruction() {
        let (instruction, contents) = provider().convert_segments(&[Segment::user("ls")]);
        assert!(instruction.is_none());
        assert_eq!(contents.len(), 1);
    }

    #[test]
    fn gemini_takes_no_context_notes_or_temperature() {
        let p = provider();
        assert!(!p.wants_context_notes());
        assert!(p.temperature().is_none());
        assert_eq!(p.name(), "gemini");
    }
}

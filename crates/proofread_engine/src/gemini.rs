use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};

use crate::provider::{build_client, endpoint, require_api_key, send_json};
use crate::{FailureKind, ProviderError, ProviderKind, ProviderSettings, TextGenerator};

/// Hosted `generateContent` endpoint; the default backend.
pub struct GeminiProvider {
    api_key: String,
    settings: ProviderSettings,
    client: reqwest::Client,
}

impl GeminiProvider {
    pub fn new(api_key: String, settings: ProviderSettings) -> Result<Self, ProviderError> {
        let api_key = require_api_key(ProviderKind::Gemini, api_key)?;
        let client = build_client(&settings)?;
        Ok(Self {
            api_key,
            settings,
            client,
        })
    }
}

#[async_trait::async_trait]
impl TextGenerator for GeminiProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Gemini
    }

    fn model(&self) -> &str {
        &self.settings.model
    }

    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let url = endpoint(
            &self.settings,
            &format!("v1beta/models/{}:generateContent", self.settings.model),
        )?;
        let body = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };
        let payload = serde_json::to_vec(&body)
            .map_err(|err| ProviderError::new(FailureKind::InvalidRequest, err.to_string()))?;

        let request = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .header(CONTENT_TYPE, "application/json")
            .body(payload);
        let parsed: GenerateContentResponse =
            send_json(request, self.settings.max_response_bytes).await?;

        Ok(parsed.text())
    }
}

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    // Absent when the prompt itself was blocked.
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Text parts of the first candidate, concatenated.
    fn text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_text_parts_of_first_candidate() {
        let raw = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "**1. Error"}, {"text": " Severity Score:**"}], "role": "model"}},
                {"content": {"parts": [{"text": "ignored"}]}}
            ]
        }"#;
        let parsed: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.text(), "**1. Error Severity Score:**");
    }

    #[test]
    fn blocked_prompt_yields_empty_text() {
        let raw = r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#;
        let parsed: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.text(), "");
    }
}

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};

use crate::provider::{build_client, endpoint, require_api_key, send_json};
use crate::{FailureKind, ProviderError, ProviderKind, ProviderSettings, TextGenerator};

/// Chat-completions endpoint; selected explicitly by the form.
pub struct OpenAiProvider {
    api_key: String,
    settings: ProviderSettings,
    client: reqwest::Client,
}

impl OpenAiProvider {
    pub fn new(api_key: String, settings: ProviderSettings) -> Result<Self, ProviderError> {
        let api_key = require_api_key(ProviderKind::OpenAi, api_key)?;
        let client = build_client(&settings)?;
        Ok(Self {
            api_key,
            settings,
            client,
        })
    }
}

#[async_trait::async_trait]
impl TextGenerator for OpenAiProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAi
    }

    fn model(&self) -> &str {
        &self.settings.model
    }

    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let url = endpoint(&self.settings, "chat/completions")?;
        let body = ChatRequest {
            model: &self.settings.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };
        let payload = serde_json::to_vec(&body)
            .map_err(|err| ProviderError::new(FailureKind::InvalidRequest, err.to_string()))?;

        let request = self
            .client
            .post(url)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(CONTENT_TYPE, "application/json")
            .body(payload);
        let parsed: ChatResponse = send_json(request, self.settings.max_response_bytes).await?;

        Ok(parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default())
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    // null when the model refused or only called tools
    content: Option<String>,
}

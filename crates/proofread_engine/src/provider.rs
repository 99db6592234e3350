use std::time::Duration;

use futures_util::StreamExt;
use proofread_logging::proofread_debug;
use serde::de::DeserializeOwned;

use crate::{FailureKind, ProviderError, ProviderKind};

/// How much of an error body is kept in the error message.
const ERROR_BODY_SNIPPET: usize = 300;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSettings {
    pub base_url: String,
    pub model: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_response_bytes: u64,
}

impl ProviderSettings {
    pub fn gemini() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-2.5-flash".to_string(),
            ..Self::common()
        }
    }

    pub fn openai() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            ..Self::common()
        }
    }

    fn common() -> Self {
        Self {
            base_url: String::new(),
            model: String::new(),
            connect_timeout: Duration::from_secs(10),
            // Generation of a few hundred words can take a while.
            request_timeout: Duration::from_secs(90),
            max_response_bytes: 2 * 1024 * 1024,
        }
    }
}

/// A remote backend that turns one prompt into one piece of generated text.
#[async_trait::async_trait]
pub trait TextGenerator: Send + Sync {
    fn kind(&self) -> ProviderKind;

    fn model(&self) -> &str;

    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;
}

pub(crate) fn require_api_key(
    provider: ProviderKind,
    api_key: String,
) -> Result<String, ProviderError> {
    let trimmed = api_key.trim();
    if trimmed.is_empty() {
        return Err(ProviderError::new(
            FailureKind::MissingCredential { provider },
            "api key is empty",
        ));
    }
    Ok(trimmed.to_string())
}

pub(crate) fn build_client(settings: &ProviderSettings) -> Result<reqwest::Client, ProviderError> {
    reqwest::Client::builder()
        .connect_timeout(settings.connect_timeout)
        .timeout(settings.request_timeout)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .map_err(|err| ProviderError::new(FailureKind::Network, err.to_string()))
}

/// Join `path` onto the configured base URL and check the result parses.
pub(crate) fn endpoint(settings: &ProviderSettings, path: &str) -> Result<url::Url, ProviderError> {
    let raw = format!("{}/{}", settings.base_url.trim_end_matches('/'), path);
    url::Url::parse(&raw)
        .map_err(|err| ProviderError::new(FailureKind::InvalidRequest, format!("{raw}: {err}")))
}

/// Send a prepared request and decode the JSON envelope of a successful reply.
pub(crate) async fn send_json<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
    max_bytes: u64,
) -> Result<T, ProviderError> {
    let response = request.send().await.map_err(map_reqwest_error)?;

    let status = response.status();
    if !status.is_success() {
        let body = read_capped_body(response, max_bytes).await.unwrap_or_default();
        let snippet: String = String::from_utf8_lossy(&body)
            .chars()
            .take(ERROR_BODY_SNIPPET)
            .collect();
        return Err(ProviderError::new(
            FailureKind::HttpStatus(status.as_u16()),
            format!("{status} {}", snippet.trim()),
        ));
    }

    let body = read_capped_body(response, max_bytes).await?;
    proofread_debug!("provider replied status={} bytes={}", status, body.len());
    serde_json::from_slice(&body)
        .map_err(|err| ProviderError::new(FailureKind::MalformedResponse, err.to_string()))
}

async fn read_capped_body(
    response: reqwest::Response,
    max_bytes: u64,
) -> Result<Vec<u8>, ProviderError> {
    if let Some(content_len) = response.content_length() {
        if content_len > max_bytes {
            return Err(ProviderError::new(
                FailureKind::TooLarge {
                    max_bytes,
                    actual: content_len,
                },
                "response too large",
            ));
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(map_reqwest_error)?;
        let next_len = bytes.len() as u64 + chunk.len() as u64;
        if next_len > max_bytes {
            return Err(ProviderError::new(
                FailureKind::TooLarge {
                    max_bytes,
                    actual: next_len,
                },
                "response too large",
            ));
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

fn map_reqwest_error(err: reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        return ProviderError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return ProviderError::new(FailureKind::MalformedResponse, err.to_string());
    }
    ProviderError::new(FailureKind::Network, err.to_string())
}

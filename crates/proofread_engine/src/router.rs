use std::sync::Arc;
use std::time::Instant;

use proofread_logging::{proofread_info, proofread_warn};

use crate::{FailureKind, ProviderError, ProviderKind, TextGenerator};

/// First line of every rendered provider failure.
pub const ERROR_MARKER: &str = "### ⚠️ API Error";

/// The backends available to the request handler, built once at startup.
///
/// Gemini is always present. OpenAI is only present when its credential was
/// configured.
#[derive(Clone)]
pub struct ProviderRouter {
    gemini: Arc<dyn TextGenerator>,
    openai: Option<Arc<dyn TextGenerator>>,
}

impl ProviderRouter {
    pub fn new(gemini: Arc<dyn TextGenerator>) -> Self {
        Self {
            gemini,
            openai: None,
        }
    }

    pub fn with_openai(mut self, openai: Arc<dyn TextGenerator>) -> Self {
        self.openai = Some(openai);
        self
    }

    pub fn has(&self, kind: ProviderKind) -> bool {
        match kind {
            ProviderKind::Gemini => true,
            ProviderKind::OpenAi => self.openai.is_some(),
        }
    }

    pub fn route(&self, kind: ProviderKind) -> Result<&dyn TextGenerator, ProviderError> {
        match kind {
            ProviderKind::Gemini => Ok(self.gemini.as_ref()),
            ProviderKind::OpenAi => self.openai.as_deref().ok_or_else(|| {
                ProviderError::new(
                    FailureKind::MissingCredential { provider: kind },
                    "no api key configured for this provider",
                )
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderOutcome {
    Completed(String),
    Failed(ProviderError),
}

impl ProviderOutcome {
    /// Generated text, or the error block for a failed call.
    pub fn into_markdown(self) -> String {
        match self {
            ProviderOutcome::Completed(text) => text,
            ProviderOutcome::Failed(err) => error_block(&err),
        }
    }
}

/// Markdown shown in place of a proofreading result when the call failed.
pub fn error_block(err: &ProviderError) -> String {
    format!(
        "{ERROR_MARKER}\nCould not process the request. Check your API key and network connection: {err}"
    )
}

/// Send `prompt` to the backend for `kind`, exactly once.
///
/// Every failure, including an unconfigured backend, is returned as
/// `ProviderOutcome::Failed`.
pub async fn proofread(router: &ProviderRouter, kind: ProviderKind, prompt: &str) -> ProviderOutcome {
    let generator = match router.route(kind) {
        Ok(generator) => generator,
        Err(err) => {
            proofread_warn!("Provider {} unavailable: {}", kind, err);
            return ProviderOutcome::Failed(err);
        }
    };

    let started = Instant::now();
    let result = generator.generate(prompt).await;
    let elapsed_ms = started.elapsed().as_millis();

    match result {
        Ok(text) => {
            proofread_info!(
                "Provider {} model={} prompt_len={} reply_len={} elapsed_ms={}",
                kind,
                generator.model(),
                prompt.len(),
                text.len(),
                elapsed_ms
            );
            ProviderOutcome::Completed(text)
        }
        Err(err) => {
            proofread_warn!(
                "Provider {} model={} failed after {}ms: {}",
                kind,
                generator.model(),
                elapsed_ms,
                err
            );
            ProviderOutcome::Failed(err)
        }
    }
}

use std::sync::Arc;

use proofread_engine::{
    GeminiProvider, MarkdownRenderer, OpenAiProvider, ProviderError, ProviderRouter,
    SafeMarkdownRenderer,
};
use proofread_logging::{proofread_info, proofread_warn};

use crate::config::{AppConfig, Credentials, OPENAI_KEY_VAR};

/// Everything a request handler needs, built once at startup and shared
/// read-only between requests.
pub struct AppServices {
    pub providers: ProviderRouter,
    pub renderer: Box<dyn MarkdownRenderer>,
}

impl AppServices {
    pub fn new(providers: ProviderRouter) -> Self {
        Self {
            providers,
            renderer: Box::new(SafeMarkdownRenderer),
        }
    }

    /// Construct both provider clients from configuration.
    ///
    /// Fails when the Gemini client cannot be built. A missing OpenAI key only
    /// disables that backend.
    pub fn from_config(config: &AppConfig, credentials: Credentials) -> Result<Self, ProviderError> {
        let gemini_settings = config.gemini_settings();
        proofread_info!(
            "Gemini backend model={} base_url={}",
            gemini_settings.model,
            gemini_settings.base_url
        );
        let gemini = GeminiProvider::new(credentials.gemini_api_key, gemini_settings)?;
        let mut providers = ProviderRouter::new(Arc::new(gemini));

        match credentials.openai_api_key {
            Some(api_key) => {
                let openai_settings = config.openai_settings();
                proofread_info!(
                    "OpenAI backend model={} base_url={}",
                    openai_settings.model,
                    openai_settings.base_url
                );
                let openai = OpenAiProvider::new(api_key, openai_settings)?;
                providers = providers.with_openai(Arc::new(openai));
            }
            None => {
                proofread_warn!(
                    "{} not set; requests selecting OpenAI will show an API error",
                    OPENAI_KEY_VAR
                );
            }
        }

        Ok(Self::new(providers))
    }
}

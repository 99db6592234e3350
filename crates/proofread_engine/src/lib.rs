//! Proofread engine: provider clients, routing, and markdown rendering.
mod gemini;
mod openai;
mod provider;
mod render;
mod router;
mod types;

pub use gemini::GeminiProvider;
pub use openai::OpenAiProvider;
pub use provider::{ProviderSettings, TextGenerator};
pub use render::{render_result, MarkdownRenderer, ProofreadResult, SafeMarkdownRenderer};
pub use router::{error_block, proofread, ProviderOutcome, ProviderRouter, ERROR_MARKER};
pub use types::{FailureKind, ProviderError, ProviderKind};

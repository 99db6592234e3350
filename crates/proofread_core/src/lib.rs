//! Proofread core: pure request state machine, prompt construction, and word counting.
mod effect;
mod form;
mod msg;
mod prompt;
mod state;
mod update;
mod view_model;
mod word_count;

pub use effect::Effect;
pub use form::{Action, ProviderChoice, SubmittedForm};
pub use msg::{Msg, ProviderReply};
pub use prompt::{build_prompt, PromptInput, CONTENT_END, CONTENT_START, OUTPUT_HEADINGS, WORD_LIMIT};
pub use state::{RequestState, ResultKind, ResultView, Stage};
pub use update::update;
pub use view_model::{PageViewModel, DIALECT_SUGGESTIONS, STYLE_GUIDE_SUGGESTIONS};
pub use word_count::{count_words, word_count_message};

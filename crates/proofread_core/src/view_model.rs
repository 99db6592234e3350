use crate::{ProviderChoice, ResultView, Stage};

/// Values offered as suggestions in the dialect field; any text is accepted.
pub const DIALECT_SUGGESTIONS: &[&str] = &[
    "US English",
    "UK English",
    "Canadian English",
    "Australian English",
];

/// Values offered as suggestions in the style guide field; any text is accepted.
pub const STYLE_GUIDE_SUGGESTIONS: &[&str] = &[
    "AP Stylebook",
    "Chicago Manual of Style",
    "APA",
    "MLA",
];

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageViewModel {
    pub stage: Stage,
    pub text_content: String,
    pub dialect: String,
    pub style_guide: String,
    pub model_choice: ProviderChoice,
    pub result: Option<ResultView>,
}

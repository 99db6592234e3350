use crate::view_model::PageViewModel;
use crate::{ProviderChoice, SubmittedForm};

/// Where a single request is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stage {
    #[default]
    AwaitingSubmission,
    AwaitingProvider,
    Rendered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultKind {
    WordCount,
    Proofread { provider: ProviderChoice },
    Error,
}

/// Markdown shown in the result area, before HTML rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub markdown: String,
    pub kind: ResultKind,
}

/// Per-request state. Created fresh for every HTTP request and dropped with it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RequestState {
    stage: Stage,
    form: Option<SubmittedForm>,
    result: Option<ResultView>,
}

impl RequestState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn form(&self) -> Option<&SubmittedForm> {
        self.form.as_ref()
    }

    pub fn result(&self) -> Option<&ResultView> {
        self.result.as_ref()
    }

    pub fn view(&self) -> PageViewModel {
        let (text_content, dialect, style_guide, model_choice) = match &self.form {
            Some(form) => (
                form.text_content.clone(),
                form.dialect.clone(),
                form.style_guide.clone(),
                form.provider(),
            ),
            None => Default::default(),
        };
        PageViewModel {
            stage: self.stage,
            text_content,
            dialect,
            style_guide,
            model_choice,
            result: self.result.clone(),
        }
    }

    pub(crate) fn accept_form(&mut self, form: SubmittedForm) {
        self.form = Some(form);
    }

    pub(crate) fn await_provider(&mut self) {
        self.stage = Stage::AwaitingProvider;
    }

    pub(crate) fn finish(&mut self, result: Option<ResultView>) {
        self.result = result;
        self.stage = Stage::Rendered;
    }
}

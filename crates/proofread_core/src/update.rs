use crate::{
    build_prompt, word_count_message, Action, Effect, Msg, PromptInput, ProviderReply,
    RequestState, ResultKind, ResultView, Stage,
};

/// Pure update function: applies a message to state and returns any effects.
///
/// Messages that do not fit the current stage leave the state untouched and
/// produce no effects.
pub fn update(mut state: RequestState, msg: Msg) -> (RequestState, Vec<Effect>) {
    let effects = match msg {
        Msg::PageRequested => {
            if state.stage() == Stage::AwaitingSubmission {
                state.finish(None);
            }
            Vec::new()
        }
        Msg::FormSubmitted(form) => {
            if state.stage() != Stage::AwaitingSubmission {
                return (state, Vec::new());
            }
            let action = form.action.clone();
            match action {
                Action::Count => {
                    let result = ResultView {
                        markdown: word_count_message(&form.text_content),
                        kind: ResultKind::WordCount,
                    };
                    state.accept_form(form);
                    state.finish(Some(result));
                    Vec::new()
                }
                Action::Proofread => {
                    let prompt = build_prompt(&PromptInput {
                        content: &form.text_content,
                        dialect: &form.dialect,
                        style_guide: &form.style_guide,
                    });
                    let choice = form.provider();
                    state.accept_form(form);
                    state.await_provider();
                    vec![Effect::CallProvider { choice, prompt }]
                }
                Action::Unrecognized(_) => {
                    state.accept_form(form);
                    state.finish(None);
                    Vec::new()
                }
            }
        }
        Msg::ProviderReplied(reply) => {
            if state.stage() != Stage::AwaitingProvider {
                return (state, Vec::new());
            }
            let provider = state.form().map(|form| form.provider()).unwrap_or_default();
            let result = match reply {
                ProviderReply::Text(markdown) => ResultView {
                    markdown,
                    kind: ResultKind::Proofread { provider },
                },
                ProviderReply::Error(markdown) => ResultView {
                    markdown,
                    kind: ResultKind::Error,
                },
            };
            state.finish(Some(result));
            Vec::new()
        }
    };

    (state, effects)
}

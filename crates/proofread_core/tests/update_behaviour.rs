use std::sync::Once;

use pretty_assertions::assert_eq;
use proofread_core::{
    update, Effect, Msg, ProviderChoice, ProviderReply, RequestState, ResultKind, Stage,
    SubmittedForm,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(proofread_logging::initialize_for_tests);
}

fn submit(action: &str, text: &str, model_choice: Option<&str>) -> (RequestState, Vec<Effect>) {
    let form = SubmittedForm::from_fields(
        text,
        "US English",
        "AP Stylebook",
        model_choice,
        Some(action),
    );
    update(RequestState::new(), Msg::FormSubmitted(form))
}

#[test]
fn page_request_renders_empty_form() {
    init_logging();
    let (state, effects) = update(RequestState::new(), Msg::PageRequested);
    let view = state.view();

    assert!(effects.is_empty());
    assert_eq!(view.stage, Stage::Rendered);
    assert_eq!(view.text_content, "");
    assert_eq!(view.result, None);
}

#[test]
fn count_renders_word_count_without_effects() {
    init_logging();
    let (state, effects) = submit("count", "the quick brown fox", None);
    let view = state.view();

    assert!(effects.is_empty());
    assert_eq!(view.stage, Stage::Rendered);
    let result = view.result.expect("word count result");
    assert_eq!(result.kind, ResultKind::WordCount);
    assert!(result.markdown.contains("**4** words"));
    assert_eq!(view.text_content, "the quick brown fox");
}

#[test]
fn proofread_emits_provider_call_with_default_choice() {
    init_logging();
    let (state, effects) = submit("proofread", "Teh cat.", None);

    assert_eq!(state.stage(), Stage::AwaitingProvider);
    assert_eq!(state.result(), None);
    assert_eq!(effects.len(), 1);
    match &effects[0] {
        Effect::CallProvider { choice, prompt } => {
            assert_eq!(*choice, ProviderChoice::Gemini);
            assert!(prompt.contains("Teh cat."));
            assert!(prompt.contains("US English"));
            assert!(prompt.contains("AP Stylebook"));
        }
    }
}

#[test]
fn proofread_respects_explicit_model_choice() {
    init_logging();
    let (_state, effects) = submit("proofread", "text", Some("openai"));
    assert!(matches!(
        effects.as_slice(),
        [Effect::CallProvider {
            choice: ProviderChoice::OpenAi,
            ..
        }]
    ));
}

#[test]
fn provider_text_reply_completes_request() {
    init_logging();
    let (state, _effects) = submit("proofread", "text", Some("openai"));
    let (state, effects) = update(
        state,
        Msg::ProviderReplied(ProviderReply::Text("**Good.**".to_string())),
    );

    assert!(effects.is_empty());
    assert_eq!(state.stage(), Stage::Rendered);
    let result = state.result().expect("proofread result");
    assert_eq!(result.markdown, "**Good.**");
    assert_eq!(
        result.kind,
        ResultKind::Proofread {
            provider: ProviderChoice::OpenAi
        }
    );
}

#[test]
fn provider_error_reply_is_marked_as_error() {
    init_logging();
    let (state, _effects) = submit("proofread", "text", None);
    let (state, _effects) = update(
        state,
        Msg::ProviderReplied(ProviderReply::Error("### ⚠️ API Error".to_string())),
    );

    let result = state.result().expect("error result");
    assert_eq!(result.kind, ResultKind::Error);
    assert_eq!(state.view().stage, Stage::Rendered);
}

#[test]
fn unrecognized_action_yields_no_result() {
    init_logging();
    for action in ["", "shout", "COUNT"] {
        let (state, effects) = submit(action, "some text", None);
        assert!(effects.is_empty(), "action {action:?}");
        assert_eq!(state.stage(), Stage::Rendered);
        assert_eq!(state.result(), None);
        // The submission is still echoed back into the form.
        assert_eq!(state.view().text_content, "some text");
    }
}

#[test]
fn empty_text_is_passed_through() {
    init_logging();
    let (state, _) = submit("count", "", None);
    assert!(state.result().unwrap().markdown.contains("**0** words"));

    let (_, effects) = submit("proofread", "", None);
    assert_eq!(effects.len(), 1);
}

#[test]
fn reply_without_pending_call_is_ignored() {
    init_logging();
    let state = RequestState::new();
    let (next, effects) = update(
        state.clone(),
        Msg::ProviderReplied(ProviderReply::Text("late".to_string())),
    );
    assert_eq!(next, state);
    assert!(effects.is_empty());

    let (rendered, _) = submit("count", "a b", None);
    let (next, effects) = update(
        rendered.clone(),
        Msg::ProviderReplied(ProviderReply::Text("late".to_string())),
    );
    assert_eq!(next, rendered);
    assert!(effects.is_empty());
}

#[test]
fn second_submission_is_ignored() {
    init_logging();
    let (state, _) = submit("count", "a b c", None);
    let again = SubmittedForm::from_fields("x", "", "", None, Some("proofread"));
    let (next, effects) = update(state.clone(), Msg::FormSubmitted(again));

    assert_eq!(next, state);
    assert!(effects.is_empty());
}

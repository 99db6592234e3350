//! HTTP surface: one page at `/` (GET renders the form, POST handles a
//! submission) plus a health probe.

mod page;

use std::collections::VecDeque;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, FromRequest, Multipart, Request, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use proofread_core::{
    count_words, update, Effect, Msg, ProviderChoice, ProviderReply, RequestState, SubmittedForm,
};
use proofread_engine::{proofread, ProviderKind, ProviderOutcome};
use proofread_logging::{proofread_debug, proofread_error, proofread_info, proofread_warn};
use serde::Serialize;
use url::form_urlencoded;

use crate::services::AppServices;

/// Upper bound on a form body.
const MAX_FORM_BYTES: usize = 1024 * 1024;

pub fn router(services: Arc<AppServices>) -> Router {
    Router::new()
        .route("/", get(show_form).post(submit_form))
        .route("/healthz", get(healthz))
        .layer(DefaultBodyLimit::max(MAX_FORM_BYTES))
        .with_state(services)
}

/// Raw form values. Every field is optional; the first occurrence of a
/// repeated key wins and unknown keys are ignored.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FormFields {
    pub text_content: Option<String>,
    pub dialect: Option<String>,
    pub style_guide: Option<String>,
    pub model_choice: Option<String>,
    pub action: Option<String>,
}

impl FormFields {
    /// Decode an `application/x-www-form-urlencoded` body.
    pub fn from_urlencoded(body: &[u8]) -> Self {
        let mut fields = Self::default();
        for (name, value) in form_urlencoded::parse(body) {
            fields.set_first(&name, value.into_owned());
        }
        fields
    }

    fn set_first(&mut self, name: &str, value: String) {
        let slot = match name {
            "text_content" => &mut self.text_content,
            "dialect" => &mut self.dialect,
            "style_guide" => &mut self.style_guide,
            "model_choice" => &mut self.model_choice,
            "action" => &mut self.action,
            _ => return,
        };
        if slot.is_none() {
            *slot = Some(value);
        }
    }

    async fn from_multipart(mut multipart: Multipart) -> Self {
        let mut fields = Self::default();
        loop {
            let field = match multipart.next_field().await {
                Ok(Some(field)) => field,
                Ok(None) => break,
                Err(err) => {
                    proofread_warn!("Stopped reading multipart form: {}", err);
                    break;
                }
            };
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            match field.text().await {
                Ok(value) => fields.set_first(&name, value),
                Err(err) => {
                    proofread_warn!("Stopped reading multipart field {}: {}", name, err);
                    break;
                }
            }
        }
        fields
    }

    fn into_form(self) -> SubmittedForm {
        SubmittedForm::from_fields(
            self.text_content.unwrap_or_default(),
            self.dialect.unwrap_or_default(),
            self.style_guide.unwrap_or_default(),
            self.model_choice.as_deref(),
            self.action.as_deref(),
        )
    }
}

/// Read the submitted fields from either a multipart or a urlencoded body.
/// The content type is not checked otherwise; an undecodable body yields
/// empty fields. Only an unreadable body (over the size limit) is rejected.
async fn read_form(request: Request) -> Result<FormFields, Response> {
    let is_multipart = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("multipart/form-data"));

    if is_multipart {
        return match Multipart::from_request(request, &()).await {
            Ok(multipart) => Ok(FormFields::from_multipart(multipart).await),
            Err(rejection) => {
                proofread_warn!("Malformed multipart form: {}", rejection);
                Ok(FormFields::default())
            }
        };
    }

    let body = Bytes::from_request(request, &())
        .await
        .map_err(IntoResponse::into_response)?;
    Ok(FormFields::from_urlencoded(&body))
}

#[derive(Serialize)]
struct Health {
    ok: bool,
    service: &'static str,
}

async fn healthz() -> Json<Health> {
    Json(Health {
        ok: true,
        service: "proofread",
    })
}

async fn show_form(State(services): State<Arc<AppServices>>) -> Response {
    let (state, _effects) = update(RequestState::new(), Msg::PageRequested);
    page_response(&services, &state)
}

async fn submit_form(State(services): State<Arc<AppServices>>, request: Request) -> Response {
    let fields = match read_form(request).await {
        Ok(fields) => fields,
        Err(response) => return response,
    };
    let form = fields.into_form();
    proofread_info!(
        "Submission action={:?} words={} provider={}",
        form.action,
        count_words(&form.text_content),
        form.provider()
    );

    let (state, effects) = update(RequestState::new(), Msg::FormSubmitted(form));
    let state = run_effects(&services, state, effects).await;
    page_response(&services, &state)
}

/// Execute effects until the state machine stops asking for more.
async fn run_effects(
    services: &AppServices,
    mut state: RequestState,
    effects: Vec<Effect>,
) -> RequestState {
    let mut pending: VecDeque<Effect> = effects.into();
    while let Some(effect) = pending.pop_front() {
        let msg = match effect {
            Effect::CallProvider { choice, prompt } => {
                proofread_debug!("CallProvider choice={} prompt_len={}", choice, prompt.len());
                let reply = match proofread(&services.providers, map_choice(choice), &prompt).await
                {
                    ProviderOutcome::Completed(text) => ProviderReply::Text(text),
                    failed @ ProviderOutcome::Failed(_) => {
                        ProviderReply::Error(failed.into_markdown())
                    }
                };
                Msg::ProviderReplied(reply)
            }
        };
        let (next, more) = update(state, msg);
        state = next;
        pending.extend(more);
    }
    state
}

fn page_response(services: &AppServices, state: &RequestState) -> Response {
    let openai_available = services.providers.has(ProviderKind::OpenAi);
    match page::render_page(&state.view(), services.renderer.as_ref(), openai_available) {
        Ok(body) => Html(body).into_response(),
        Err(err) => {
            proofread_error!("Failed to render page: {}", err);
            (StatusCode::INTERNAL_SERVER_ERROR, "failed to render page").into_response()
        }
    }
}

fn map_choice(choice: ProviderChoice) -> ProviderKind {
    match choice {
        ProviderChoice::Gemini => ProviderKind::Gemini,
        ProviderChoice::OpenAi => ProviderKind::OpenAi,
    }
}

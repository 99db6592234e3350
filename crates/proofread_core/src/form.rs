use std::fmt;

/// Operation requested by the submit button the user pressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Count,
    Proofread,
    /// Missing or unknown button value; produces no result.
    Unrecognized(String),
}

impl Action {
    /// Button values are matched exactly (`count`, `proofread`).
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("count") => Action::Count,
            Some("proofread") => Action::Proofread,
            Some(other) => Action::Unrecognized(other.to_string()),
            None => Action::Unrecognized(String::new()),
        }
    }
}

/// Which remote text-generation backend handles a proofread request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderChoice {
    #[default]
    Gemini,
    OpenAi,
}

impl ProviderChoice {
    /// Case-insensitive; blank or unknown values yield `None` so the caller can
    /// fall back to the default backend.
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        let value = raw?.trim();
        if value.eq_ignore_ascii_case("gemini") {
            Some(ProviderChoice::Gemini)
        } else if value.eq_ignore_ascii_case("openai") {
            Some(ProviderChoice::OpenAi)
        } else {
            None
        }
    }

    /// Form value for this choice.
    pub fn as_str(self) -> &'static str {
        match self {
            ProviderChoice::Gemini => "gemini",
            ProviderChoice::OpenAi => "openai",
        }
    }
}

impl fmt::Display for ProviderChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderChoice::Gemini => write!(f, "Gemini"),
            ProviderChoice::OpenAi => write!(f, "OpenAI"),
        }
    }
}

/// One form submission. Fields are carried as typed in; nothing is validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedForm {
    pub text_content: String,
    pub dialect: String,
    pub style_guide: String,
    pub model_choice: Option<ProviderChoice>,
    pub action: Action,
}

impl SubmittedForm {
    pub fn from_fields(
        text_content: impl Into<String>,
        dialect: impl Into<String>,
        style_guide: impl Into<String>,
        model_choice: Option<&str>,
        action: Option<&str>,
    ) -> Self {
        Self {
            text_content: text_content.into(),
            dialect: dialect.into(),
            style_guide: style_guide.into(),
            model_choice: ProviderChoice::parse(model_choice),
            action: Action::parse(action),
        }
    }

    pub fn provider(&self) -> ProviderChoice {
        self.model_choice.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_values_are_exact() {
        assert_eq!(Action::parse(Some("count")), Action::Count);
        assert_eq!(Action::parse(Some("proofread")), Action::Proofread);
        assert_eq!(
            Action::parse(Some("Proofread")),
            Action::Unrecognized("Proofread".to_string())
        );
        assert_eq!(Action::parse(None), Action::Unrecognized(String::new()));
    }

    #[test]
    fn provider_choice_defaults_to_gemini() {
        assert_eq!(ProviderChoice::parse(Some(" OpenAI ")), Some(ProviderChoice::OpenAi));
        assert_eq!(ProviderChoice::parse(Some("claude")), None);

        let form = SubmittedForm::from_fields("text", "US English", "AP", Some(""), Some("count"));
        assert_eq!(form.model_choice, None);
        assert_eq!(form.provider(), ProviderChoice::Gemini);
    }
}

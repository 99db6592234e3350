#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Browser asked for the page without submitting anything.
    PageRequested,
    /// Browser posted the form.
    FormSubmitted(crate::SubmittedForm),
    /// The provider call requested by `Effect::CallProvider` finished.
    ProviderReplied(ProviderReply),
}

/// Markdown produced for a provider call, tagged by whether the call failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderReply {
    Text(String),
    Error(String),
}

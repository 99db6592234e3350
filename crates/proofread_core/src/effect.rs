use crate::ProviderChoice;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send the assembled prompt to the selected provider and report back with
    /// `Msg::ProviderReplied`.
    CallProvider {
        choice: ProviderChoice,
        prompt: String,
    },
}

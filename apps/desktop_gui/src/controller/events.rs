//! Events sent from the backend worker to the UI thread.

pub enum UiEvent {
    Info(String),
    DefinitionReady(String),
    DefinitionFailed(anyhow::Error),
}

impl std::fmt::Debug for UiEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UiEvent::Info(message) => f.debug_tuple("Info").field(message).finish(),
            UiEvent::DefinitionReady(text) => f
                .debug_struct("DefinitionReady")
                .field("chars", &text.chars().count())
                .finish(),
            UiEvent::DefinitionFailed(err) => {
                f.debug_tuple("DefinitionFailed").field(&err.to_string()).finish()
            }
        }
    }
}

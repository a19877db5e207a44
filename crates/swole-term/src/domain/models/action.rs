use swole_core::{ChatError, StagedFile};

#[derive(Debug, Clone)]
pub enum Action {
    SubmitPrompt { prompt: String, files: Vec<StagedFile> },
    /// Sent by the completion worker back to the actions loop, which commits
    /// the exchange to the session on success.
    CompletionDelivered {
        prompt: String,
        result: Result<String, ChatError>,
    },
    AbortCompletion,
    ResetSession,
    SetModel(String),
    SetPersonality(bool),
}

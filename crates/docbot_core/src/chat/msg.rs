use crate::chat::{PendingFile, RunId, ScraperReply};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User sent free text (typed or via a quick action).
    InputSubmitted(String),
    /// User attached a URL to the scraping queue.
    UrlAttached(String),
    /// User attached one or more local files in a single action.
    FilesAttached(Vec<PendingFile>),
    /// Answer to a pending `Effect::RequestConfirmation`.
    ConfirmationAnswered(bool),
    /// Backend reply for the step in flight.
    ScraperReplied {
        run_id: RunId,
        result: Result<ScraperReply, String>,
    },
    /// The pause between workflow stages has elapsed.
    PauseElapsed { run_id: RunId },
    /// User cleared the conversation.
    ChatCleared,
    /// Fallback for placeholder wiring.
    NoOp,
}

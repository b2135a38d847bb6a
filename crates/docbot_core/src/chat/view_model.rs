use crate::chat::{ChatMessage, Workflow};
use crate::Notice;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatViewModel {
    pub busy: bool,
    pub awaiting_confirmation: bool,
    pub active_workflow: Option<Workflow>,
    pub messages: Vec<ChatMessage>,
    pub queued_urls: Vec<String>,
    pub queued_files: Vec<String>,
    pub notices: Vec<Notice>,
    pub dirty: bool,
}

impl ChatViewModel {
    /// Messages whose text contains `needle`; progress entries never match.
    pub fn texts_containing<'a>(&'a self, needle: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.messages
            .iter()
            .filter_map(|message| message.text())
            .filter(move |text| text.contains(needle))
    }
}

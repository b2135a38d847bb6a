use chrono::{DateTime, Utc};

pub type MessageId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Author {
    User,
    System,
}

/// Progress entry rendered as a bar; updated in place while a stage runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressView {
    pub title: String,
    pub percent: u8,
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageBody {
    Text(String),
    Progress(ProgressView),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: MessageId,
    pub author: Author,
    pub body: MessageBody,
    pub timestamp: DateTime<Utc>,
    /// Bumped on every in-place update so renderers can spot changes.
    pub revision: u32,
}

impl ChatMessage {
    pub fn text(&self) -> Option<&str> {
        match &self.body {
            MessageBody::Text(text) => Some(text),
            MessageBody::Progress(_) => None,
        }
    }

    pub fn progress(&self) -> Option<&ProgressView> {
        match &self.body {
            MessageBody::Progress(progress) => Some(progress),
            MessageBody::Text(_) => None,
        }
    }
}

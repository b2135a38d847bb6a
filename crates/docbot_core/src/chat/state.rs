use std::path::PathBuf;
use std::time::Duration;

use crate::chat::message::{Author, ChatMessage, MessageBody, MessageId, ProgressView};
use crate::chat::text;
use crate::chat::view_model::ChatViewModel;
use crate::chat::workflow::{RunId, Workflow, WorkflowRun};
use crate::{system_clock, Clock, Notice, NoticeLevel};

/// Pause between full-workflow stages.
pub const DEFAULT_STAGE_PAUSE: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Pdf,
    Text,
}

/// A local file queued for processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFile {
    pub name: String,
    pub size_bytes: u64,
    pub kind: FileKind,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Activity {
    Idle,
    AwaitingConfirmation(Workflow),
    Running(WorkflowRun),
}

#[derive(Debug, Clone)]
pub struct ChatState {
    messages: Vec<ChatMessage>,
    pub(crate) urls: Vec<String>,
    pub(crate) files: Vec<PendingFile>,
    pub(crate) activity: Activity,
    notices: Vec<Notice>,
    next_message_id: MessageId,
    next_run_id: RunId,
    stage_pause: Duration,
    clock: Clock,
    dirty: bool,
}

impl Default for ChatState {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatState {
    /// Creates a conversation holding only the welcome message.
    pub fn new() -> Self {
        Self::with_clock(system_clock)
    }

    pub fn with_clock(clock: Clock) -> Self {
        let mut state = Self {
            messages: Vec::new(),
            urls: Vec::new(),
            files: Vec::new(),
            activity: Activity::Idle,
            notices: Vec::new(),
            next_message_id: 1,
            next_run_id: 1,
            stage_pause: DEFAULT_STAGE_PAUSE,
            clock,
            dirty: false,
        };
        state.push_system(text::WELCOME);
        state
    }

    pub fn with_stage_pause(mut self, pause: Duration) -> Self {
        self.stage_pause = pause;
        self
    }

    pub fn view(&self) -> ChatViewModel {
        let active_workflow = match &self.activity {
            Activity::Idle => None,
            Activity::AwaitingConfirmation(workflow) => Some(*workflow),
            Activity::Running(run) => Some(run.workflow),
        };
        ChatViewModel {
            busy: self.is_busy(),
            awaiting_confirmation: matches!(self.activity, Activity::AwaitingConfirmation(_)),
            active_workflow,
            messages: self.messages.clone(),
            queued_urls: self.urls.clone(),
            queued_files: self.files.iter().map(|file| file.name.clone()).collect(),
            notices: self.notices.clone(),
            dirty: self.dirty,
        }
    }

    pub fn is_busy(&self) -> bool {
        !matches!(self.activity, Activity::Idle)
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn queued_urls(&self) -> &[String] {
        &self.urls
    }

    pub fn queued_files(&self) -> &[PendingFile] {
        &self.files
    }

    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Removes and returns notices raised since the last call.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub(crate) fn stage_pause(&self) -> Duration {
        self.stage_pause
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn allocate_run_id(&mut self) -> RunId {
        let id = self.next_run_id;
        self.next_run_id += 1;
        id
    }

    pub(crate) fn push_notice(&mut self, level: NoticeLevel, text: impl Into<String>) {
        self.notices.push(Notice::new(level, text));
        self.mark_dirty();
    }

    pub(crate) fn push_user(&mut self, text: impl Into<String>) -> MessageId {
        self.push_message(Author::User, MessageBody::Text(text.into()))
    }

    pub(crate) fn push_system(&mut self, text: impl Into<String>) -> MessageId {
        self.push_message(Author::System, MessageBody::Text(text.into()))
    }

    pub(crate) fn push_progress(&mut self, title: &str) -> MessageId {
        self.push_message(
            Author::System,
            MessageBody::Progress(ProgressView {
                title: title.to_string(),
                percent: 0,
                status: None,
            }),
        )
    }

    /// Updates a progress message in place. Ignored for other message kinds.
    pub(crate) fn update_progress(&mut self, id: MessageId, percent: u8, status: &str) {
        let Some(message) = self.messages.iter_mut().find(|message| message.id == id) else {
            return;
        };
        if let MessageBody::Progress(progress) = &mut message.body {
            progress.percent = percent.min(100);
            progress.status = Some(status.to_string());
            message.revision += 1;
            self.dirty = true;
        }
    }

    /// Drops everything but the welcome message.
    pub(crate) fn clear_messages(&mut self) {
        self.messages.truncate(1);
        self.mark_dirty();
    }

    fn push_message(&mut self, author: Author, body: MessageBody) -> MessageId {
        let id = self.next_message_id;
        self.next_message_id += 1;
        self.messages.push(ChatMessage {
            id,
            author,
            body,
            timestamp: (self.clock)(),
            revision: 0,
        });
        self.mark_dirty();
        id
    }
}

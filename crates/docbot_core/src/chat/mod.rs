//! Chat controller for the document scraping backend.
mod command;
mod effect;
mod message;
mod msg;
mod state;
mod text;
mod update;
mod view_model;
mod workflow;

pub use command::{route_command, Command, COMMANDS};
pub use effect::Effect;
pub use message::{Author, ChatMessage, MessageBody, MessageId, ProgressView};
pub use msg::Msg;
pub use state::{ChatState, FileKind, PendingFile, DEFAULT_STAGE_PAUSE};
pub use update::update;
pub use view_model::ChatViewModel;
pub use workflow::{
    ClearOutcome, FileCounts, ModelNames, RunId, ScrapeOutcome, ScraperCall, ScraperReply, Stage,
    SystemStatus, Workflow,
};

//! Contract analysis controller: section/tab navigation and form calls.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::{ContractCall, Effect};
pub use msg::{
    AnalysisReply, ClauseMatch, ContractPreview, ContractReply, HistoryEntry, Msg,
    NegotiationSummary, Settings, SettingsSnapshot,
};
pub use state::{ContractState, GeneratedContract, ResultTab, Section};
pub use update::update;
pub use view_model::{
    AnalysisBlocks, ContractViewModel, HistoryPanel, NegotiationView, SearchView,
};

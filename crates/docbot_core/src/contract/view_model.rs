use crate::contract::{
    ClauseMatch, ContractPreview, GeneratedContract, HistoryEntry, NegotiationSummary, ResultTab,
    Section, SettingsSnapshot,
};
use crate::Notice;

/// Pretty-printed JSON for each analysis result tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisBlocks {
    pub ner: String,
    pub clause: String,
    pub negotiation: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchView {
    pub term: String,
    pub matches: Vec<ClauseMatch>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NegotiationView {
    pub topic: String,
    pub summary: NegotiationSummary,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HistoryPanel {
    #[default]
    NotLoaded,
    Loading,
    Loaded(Vec<HistoryEntry>),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContractViewModel {
    pub section: Section,
    pub tab: ResultTab,
    pub loading: bool,
    pub analysis: Option<AnalysisBlocks>,
    /// Block for the selected tab, when an analysis exists.
    pub active_block: Option<String>,
    pub has_contract: bool,
    pub contracts: Vec<GeneratedContract>,
    pub search: Option<SearchView>,
    pub negotiation: Option<NegotiationView>,
    pub history: HistoryPanel,
    pub settings: Option<SettingsSnapshot>,
    pub preview: Option<ContractPreview>,
    pub notices: Vec<Notice>,
    pub dirty: bool,
}

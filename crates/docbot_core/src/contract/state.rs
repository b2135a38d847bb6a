use chrono::{DateTime, Utc};

use crate::contract::view_model::{
    AnalysisBlocks, ContractViewModel, HistoryPanel, NegotiationView, SearchView,
};
use crate::contract::{ContractPreview, SettingsSnapshot};
use crate::{system_clock, Clock, Notice, NoticeLevel};

/// Top-level page section. `Query` is where a session starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    Query,
    History,
    Contract,
    Settings,
}

impl Section {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "query" => Some(Self::Query),
            "history" => Some(Self::History),
            "contract" | "contracts" => Some(Self::Contract),
            "settings" => Some(Self::Settings),
            _ => None,
        }
    }
}

/// Result tab inside the query section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultTab {
    #[default]
    Ner,
    Clause,
    Negotiation,
    Answer,
}

impl ResultTab {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "ner" | "entities" => Some(Self::Ner),
            "clause" | "clauses" => Some(Self::Clause),
            "negotiation" => Some(Self::Negotiation),
            "answer" => Some(Self::Answer),
            _ => None,
        }
    }
}

/// A contract produced by an analysis during this session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedContract {
    pub query: String,
    pub generated_at: DateTime<Utc>,
    pub word_count: usize,
}

#[derive(Debug, Clone)]
pub struct ContractState {
    pub(crate) section: Section,
    pub(crate) tab: ResultTab,
    pub(crate) analysis: Option<AnalysisBlocks>,
    pub(crate) contract_text: Option<String>,
    pub(crate) generated: Vec<GeneratedContract>,
    pub(crate) search: Option<SearchView>,
    pub(crate) negotiation: Option<NegotiationView>,
    pub(crate) history: HistoryPanel,
    pub(crate) settings: Option<SettingsSnapshot>,
    pub(crate) preview: Option<ContractPreview>,
    in_flight: usize,
    notices: Vec<Notice>,
    clock: Clock,
    dirty: bool,
}

impl Default for ContractState {
    fn default() -> Self {
        Self::new()
    }
}

impl ContractState {
    pub fn new() -> Self {
        Self::with_clock(system_clock)
    }

    pub fn with_clock(clock: Clock) -> Self {
        Self {
            section: Section::default(),
            tab: ResultTab::default(),
            analysis: None,
            contract_text: None,
            generated: Vec::new(),
            search: None,
            negotiation: None,
            history: HistoryPanel::NotLoaded,
            settings: None,
            preview: None,
            in_flight: 0,
            notices: Vec::new(),
            clock,
            dirty: false,
        }
    }

    pub fn view(&self) -> ContractViewModel {
        let active_block = self.analysis.as_ref().map(|blocks| match self.tab {
            ResultTab::Ner => blocks.ner.clone(),
            ResultTab::Clause => blocks.clause.clone(),
            ResultTab::Negotiation => blocks.negotiation.clone(),
            ResultTab::Answer => blocks.answer.clone(),
        });
        ContractViewModel {
            section: self.section,
            tab: self.tab,
            loading: self.in_flight > 0,
            analysis: self.analysis.clone(),
            active_block,
            has_contract: self.contract_text.is_some(),
            contracts: self.generated.iter().rev().cloned().collect(),
            search: self.search.clone(),
            negotiation: self.negotiation.clone(),
            history: self.history.clone(),
            settings: self.settings.clone(),
            preview: self.preview.clone(),
            notices: self.notices.clone(),
            dirty: self.dirty,
        }
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn tab(&self) -> ResultTab {
        self.tab
    }

    /// Contract text retained from the last successful analysis.
    pub fn contract_text(&self) -> Option<&str> {
        self.contract_text.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Removes and returns notices raised since the last call.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub(crate) fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn push_notice(&mut self, level: NoticeLevel, text: impl Into<String>) {
        self.notices.push(Notice::new(level, text));
        self.mark_dirty();
    }

    pub(crate) fn begin_call(&mut self) {
        self.in_flight += 1;
        self.mark_dirty();
    }

    pub(crate) fn end_call(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.mark_dirty();
    }
}

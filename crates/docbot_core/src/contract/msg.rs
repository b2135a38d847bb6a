use serde_json::Value;

use crate::contract::{ContractCall, ResultTab, Section};

/// Raw `/analyze` reply; each result block is free-form JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReply {
    pub ner_result: Value,
    pub clause_result: Option<Value>,
    pub negotiation_result: Value,
    pub answer_result: Value,
    pub contract_text: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NegotiationSummary {
    pub key_points: Vec<String>,
    pub recommendations: Vec<String>,
    pub risk_assessment: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClauseMatch {
    pub category: String,
    pub relevance_score: f64,
    pub text: String,
    pub risk_type: String,
}

impl ClauseMatch {
    pub fn relevance_percent(&self) -> u32 {
        (self.relevance_score * 100.0).round().clamp(0.0, 100.0) as u32
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractPreview {
    pub text: String,
    pub pages: Option<u64>,
    pub word_count: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub id: String,
    pub query: String,
    pub entities_found: u64,
    pub status: Option<String>,
    pub timestamp: String,
}

/// Settings form contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub model: String,
    pub language: String,
    pub auto_save: bool,
}

/// Settings as reported by the backend; any field may be missing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SettingsSnapshot {
    pub model: Option<String>,
    pub language: Option<String>,
    pub auto_save: Option<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ContractReply {
    Analysis(AnalysisReply),
    Negotiation(NegotiationSummary),
    ClauseMatches(Vec<ClauseMatch>),
    Preview(ContractPreview),
    History(Vec<HistoryEntry>),
    Settings(SettingsSnapshot),
    SettingsSaved,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Client started; probe the backend.
    Started,
    TabSelected(ResultTab),
    SectionSelected(Section),
    QuerySubmitted(String),
    ClauseSearchSubmitted(String),
    NegotiationSubmitted(String),
    SettingsSubmitted(Settings),
    PreviewRequested,
    PreviewClosed,
    CopyRequested,
    DownloadRequested,
    /// Backend result for `call`, echoed back by the effect runner.
    Replied {
        call: ContractCall,
        result: Result<ContractReply, String>,
    },
    CopyFinished(Result<(), String>),
    /// Outcome of `Effect::SaveContract`; `Ok` carries the written path.
    ContractSaved(Result<String, String>),
    /// Fallback for placeholder wiring.
    NoOp,
}

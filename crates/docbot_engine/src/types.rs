use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Identifies a chat workflow run; echoed back on scraper events.
pub type RunId = u64;
/// Identifies a contract request; echoed back on contract events.
pub type Ticket = u64;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiError {
    pub kind: FailureKind,
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    Network,
    Decode,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Decode => write!(f, "malformed response"),
        }
    }
}

// Document scraping API.

#[derive(Debug, Clone, Serialize)]
pub struct ScrapeRequest<'a> {
    pub urls: &'a [String],
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScrapeResult {
    pub url: String,
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScrapeResponse {
    #[serde(default)]
    pub results: Vec<ScrapeResult>,
}

/// Shared reply shape of the processing endpoints; each fills a subset.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct BatchResponse {
    #[serde(default)]
    pub results: Vec<Value>,
    #[serde(default)]
    pub total_clauses: Option<u64>,
    #[serde(default)]
    pub processed: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct StatusFiles {
    #[serde(default)]
    pub raw_docs: u64,
    #[serde(default)]
    pub combined_docs: u64,
    #[serde(default)]
    pub cleaned_docs: u64,
    #[serde(default)]
    pub clauses: u64,
    #[serde(default)]
    pub metadata: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct StatusModels {
    #[serde(default)]
    pub llama: String,
    #[serde(default)]
    pub embedding: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub files: StatusFiles,
    #[serde(default)]
    pub models: StatusModels,
    #[serde(default)]
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClearResponse {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

// Contract analysis API.

#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeRequest<'a> {
    pub query: &'a str,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnalyzeResponse {
    #[serde(default)]
    pub ner_result: Value,
    #[serde(default)]
    pub clause_result: Option<Value>,
    #[serde(default)]
    pub negotiation_result: Value,
    #[serde(default)]
    pub answer_result: Value,
    #[serde(default)]
    pub contract_text: String,
}

impl AnalyzeResponse {
    /// Decodes the structured negotiation block.
    pub fn negotiation(&self) -> Result<NegotiationResult, ApiError> {
        serde_json::from_value(self.negotiation_result.clone()).map_err(|err| {
            ApiError::new(
                FailureKind::Decode,
                format!("invalid negotiation_result: {err}"),
            )
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct NegotiationResult {
    #[serde(default)]
    pub key_points: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub risk_assessment: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClauseSearchRequest<'a> {
    pub search_term: &'a str,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClauseHit {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub relevance_score: f64,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub risk_type: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClauseSearchResponse {
    #[serde(default)]
    pub results: Vec<ClauseHit>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PreviewRequest<'a> {
    pub contract_text: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PreviewResponse {
    pub contract: String,
    #[serde(default)]
    pub pages: Option<u64>,
    #[serde(default)]
    pub word_count: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HistoryItem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub entities_found: u64,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HistoryResponse {
    #[serde(default)]
    pub history: Vec<HistoryItem>,
}

/// Settings as sent to and read from `/settings`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SettingsPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, rename = "autoSave", skip_serializing_if = "Option::is_none")]
    pub auto_save: Option<bool>,
}

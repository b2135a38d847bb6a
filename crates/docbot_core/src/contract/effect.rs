use crate::contract::Settings;

/// A request to the contract analysis backend.
#[derive(Debug, Clone, PartialEq)]
pub enum ContractCall {
    /// Startup connectivity check.
    Probe,
    Analyze { query: String },
    Negotiate { topic: String },
    SearchClauses { term: String },
    Preview { contract_text: String },
    LoadHistory,
    LoadSettings,
    SaveSettings(Settings),
}

impl ContractCall {
    /// Query text actually sent to `/analyze` for negotiation requests.
    pub fn negotiation_query(topic: &str) -> String {
        format!("Negotiate {topic}")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Call(ContractCall),
    CopyToClipboard(String),
    SaveContract { filename: String, text: String },
}

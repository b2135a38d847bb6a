use serde_json::Value;

use crate::contract::view_model::{AnalysisBlocks, HistoryPanel, NegotiationView, SearchView};
use crate::contract::{
    AnalysisReply, ContractCall, ContractReply, ContractState, Effect, GeneratedContract, Msg,
    Section,
};
use crate::NoticeLevel;

const NO_CONTRACT: &str = "No contract generated yet. Please analyze a query first.";
const NO_CLAUSES: &str = "No relevant clauses found.";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: ContractState, msg: Msg) -> (ContractState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started => call(&mut state, ContractCall::Probe),
        Msg::TabSelected(tab) => {
            state.tab = tab;
            state.mark_dirty();
            Vec::new()
        }
        Msg::SectionSelected(section) => show_section(&mut state, section),
        Msg::QuerySubmitted(raw) => {
            let query = raw.trim();
            if query.is_empty() {
                state.push_notice(NoticeLevel::Error, "Please enter a query first.");
                return (state, Vec::new());
            }
            call(
                &mut state,
                ContractCall::Analyze {
                    query: query.to_string(),
                },
            )
        }
        Msg::ClauseSearchSubmitted(raw) => {
            let term = raw.trim();
            if term.is_empty() {
                state.push_notice(NoticeLevel::Error, "Please enter a search term");
                return (state, Vec::new());
            }
            call(
                &mut state,
                ContractCall::SearchClauses {
                    term: term.to_string(),
                },
            )
        }
        Msg::NegotiationSubmitted(raw) => {
            let topic = raw.trim();
            if topic.is_empty() {
                state.push_notice(NoticeLevel::Error, "Please enter a negotiation topic");
                return (state, Vec::new());
            }
            call(
                &mut state,
                ContractCall::Negotiate {
                    topic: topic.to_string(),
                },
            )
        }
        Msg::SettingsSubmitted(settings) => call(&mut state, ContractCall::SaveSettings(settings)),
        Msg::PreviewRequested => match state.contract_text.clone() {
            Some(contract_text) => call(&mut state, ContractCall::Preview { contract_text }),
            None => {
                state.push_notice(NoticeLevel::Warning, NO_CONTRACT);
                Vec::new()
            }
        },
        Msg::PreviewClosed => {
            if state.preview.take().is_some() {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::CopyRequested => match state.contract_text.clone() {
            Some(text) => vec![Effect::CopyToClipboard(text)],
            None => {
                state.push_notice(NoticeLevel::Warning, NO_CONTRACT);
                Vec::new()
            }
        },
        Msg::DownloadRequested => match state.contract_text.clone() {
            Some(text) => {
                let filename = format!("contract_{}.txt", state.now().format("%Y-%m-%d"));
                vec![Effect::SaveContract { filename, text }]
            }
            None => {
                state.push_notice(NoticeLevel::Warning, NO_CONTRACT);
                Vec::new()
            }
        },
        Msg::Replied { call, result } => {
            state.end_call();
            match result {
                Ok(reply) => apply_reply(&mut state, call, reply),
                Err(error) => apply_failure(&mut state, &call, &error),
            }
            Vec::new()
        }
        Msg::CopyFinished(result) => {
            match result {
                Ok(()) => state.push_notice(NoticeLevel::Success, "Contract copied to clipboard!"),
                Err(error) => state.push_notice(
                    NoticeLevel::Error,
                    format!("Failed to copy contract: {error}"),
                ),
            }
            Vec::new()
        }
        Msg::ContractSaved(result) => {
            match result {
                Ok(path) => state.push_notice(
                    NoticeLevel::Success,
                    format!("Contract downloaded successfully! Saved to {path}"),
                ),
                Err(error) => state.push_notice(
                    NoticeLevel::Error,
                    format!("Failed to save contract: {error}"),
                ),
            }
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn call(state: &mut ContractState, call: ContractCall) -> Vec<Effect> {
    state.begin_call();
    vec![Effect::Call(call)]
}

fn show_section(state: &mut ContractState, section: Section) -> Vec<Effect> {
    state.section = section;
    state.mark_dirty();
    match section {
        Section::Query | Section::Contract => Vec::new(),
        Section::History => {
            state.history = HistoryPanel::Loading;
            call(state, ContractCall::LoadHistory)
        }
        Section::Settings => call(state, ContractCall::LoadSettings),
    }
}

fn apply_reply(state: &mut ContractState, call: ContractCall, reply: ContractReply) {
    match (call, reply) {
        (ContractCall::Probe, ContractReply::Settings(settings)) => {
            state.settings = Some(settings);
            state.push_notice(NoticeLevel::Success, "Backend connected successfully!");
        }
        (ContractCall::Analyze { query }, ContractReply::Analysis(analysis)) => {
            store_analysis(state, query, analysis);
            state.push_notice(
                NoticeLevel::Success,
                "Analysis complete! Check the tabs for results.",
            );
        }
        (ContractCall::Negotiate { topic }, ContractReply::Negotiation(summary)) => {
            state.negotiation = Some(NegotiationView { topic, summary });
            state.push_notice(NoticeLevel::Success, "Negotiation analysis complete!");
        }
        (ContractCall::SearchClauses { term }, ContractReply::ClauseMatches(matches)) => {
            let found = matches.len();
            state.search = Some(SearchView { term, matches });
            state.push_notice(
                NoticeLevel::Success,
                format!("Found {found} matching clauses"),
            );
        }
        (ContractCall::Preview { .. }, ContractReply::Preview(preview)) => {
            state.preview = Some(preview);
            state.mark_dirty();
        }
        (ContractCall::LoadHistory, ContractReply::History(entries)) => {
            state.history = HistoryPanel::Loaded(entries);
            state.mark_dirty();
        }
        (ContractCall::LoadSettings, ContractReply::Settings(settings)) => {
            state.settings = Some(settings);
            state.mark_dirty();
        }
        (ContractCall::SaveSettings(_), ContractReply::SettingsSaved) => {
            state.push_notice(NoticeLevel::Success, "Settings saved successfully!");
        }
        (call, _) => apply_failure(state, &call, "unexpected response from server"),
    }
}

fn apply_failure(state: &mut ContractState, call: &ContractCall, error: &str) {
    let text = match call {
        ContractCall::Probe => {
            "Backend connection failed. Please start the contract analysis server.".to_string()
        }
        ContractCall::Analyze { .. }
        | ContractCall::Negotiate { .. }
        | ContractCall::SearchClauses { .. } => format!("Error: {error}"),
        ContractCall::Preview { .. } => format!("Error previewing contract: {error}"),
        ContractCall::LoadHistory => {
            state.history = HistoryPanel::Failed(error.to_string());
            format!("Error loading history: {error}")
        }
        ContractCall::LoadSettings => format!("Error loading settings: {error}"),
        ContractCall::SaveSettings(_) => format!("Error saving settings: {error}"),
    };
    state.push_notice(NoticeLevel::Error, text);
}

fn store_analysis(state: &mut ContractState, query: String, analysis: AnalysisReply) {
    let clause = match &analysis.clause_result {
        Some(value) if !value.is_null() => pretty(value),
        _ => NO_CLAUSES.to_string(),
    };
    state.analysis = Some(AnalysisBlocks {
        ner: pretty(&analysis.ner_result),
        clause,
        negotiation: pretty(&analysis.negotiation_result),
        answer: pretty(&analysis.answer_result),
    });
    state.generated.push(GeneratedContract {
        query,
        generated_at: state.now(),
        word_count: analysis.contract_text.split_whitespace().count(),
    });
    state.contract_text = Some(analysis.contract_text);
    state.mark_dirty();
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

use std::collections::HashMap;
use std::io::{self, Write};

use docbot_core::chat::{
    self, ClearOutcome, FileCounts, ModelNames, RunId, ScrapeOutcome, ScraperCall, ScraperReply,
    SystemStatus,
};
use docbot_core::contract::{
    self, AnalysisReply, ClauseMatch, ContractCall, ContractPreview, ContractReply, HistoryEntry,
    NegotiationSummary, SettingsSnapshot,
};
use docbot_engine::{
    BatchResponse, ContractArchive, ContractCommand, ContractOutput, EngineEvent, EngineHandle,
    ScraperCommand, ScraperOutput, SettingsPayload, Ticket,
};
use docbot_logging::{docbot_info, docbot_warn};

use super::clipboard;

const UNEXPECTED_OUTPUT: &str = "unexpected response from server";

/// Executes controller effects through the engine and turns engine events
/// back into controller messages.
pub struct EffectRunner {
    engine: EngineHandle,
    archive: ContractArchive,
    scraper_calls: HashMap<RunId, ScraperCall>,
    contract_calls: HashMap<Ticket, ContractCall>,
    next_ticket: Ticket,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, archive: ContractArchive) -> Self {
        Self {
            engine,
            archive,
            scraper_calls: HashMap::new(),
            contract_calls: HashMap::new(),
            next_ticket: 1,
        }
    }

    /// Runs chat effects; returns confirmation prompts for the terminal.
    pub fn run_chat(&mut self, effects: Vec<chat::Effect>) -> Vec<String> {
        let mut prompts = Vec::new();
        for effect in effects {
            match effect {
                chat::Effect::CallScraper { run_id, call } => {
                    docbot_info!("run {} -> {:?}", run_id, call);
                    self.engine.call_scraper(run_id, scraper_command(&call));
                    self.scraper_calls.insert(run_id, call);
                }
                chat::Effect::Pause { run_id, duration } => {
                    self.engine.pause(run_id, duration);
                }
                chat::Effect::RequestConfirmation { prompt } => prompts.push(prompt),
            }
        }
        prompts
    }

    /// Runs contract effects; local effects report back immediately.
    pub fn run_contract(&mut self, effects: Vec<contract::Effect>) -> Vec<contract::Msg> {
        let mut replies = Vec::new();
        for effect in effects {
            match effect {
                contract::Effect::Call(call) => {
                    let ticket = self.next_ticket;
                    self.next_ticket += 1;
                    docbot_info!("request {} -> {:?}", ticket, call);
                    self.engine.call_contract(ticket, contract_command(&call));
                    self.contract_calls.insert(ticket, call);
                }
                contract::Effect::CopyToClipboard(text) => {
                    let mut stdout = io::stdout();
                    let result = clipboard::copy(&mut stdout, &text)
                        .and_then(|()| stdout.flush())
                        .map_err(|err| err.to_string());
                    replies.push(contract::Msg::CopyFinished(result));
                }
                contract::Effect::SaveContract { filename, text } => {
                    let result = self
                        .archive
                        .save(&filename, &text)
                        .map(|path| path.display().to_string())
                        .map_err(|err| {
                            docbot_warn!("saving {} failed: {}", filename, err);
                            err.to_string()
                        });
                    replies.push(contract::Msg::ContractSaved(result));
                }
            }
        }
        replies
    }

    pub fn chat_msg(&mut self, event: EngineEvent) -> Option<chat::Msg> {
        match event {
            EngineEvent::Scraper { run_id, result } => {
                let Some(call) = self.scraper_calls.remove(&run_id) else {
                    docbot_warn!("reply for unknown run {}", run_id);
                    return None;
                };
                let result = match result {
                    Ok(output) => scraper_reply(&call, output),
                    Err(err) => {
                        docbot_warn!("run {} failed: {} ({})", run_id, err, err.kind);
                        Err(err.to_string())
                    }
                };
                Some(chat::Msg::ScraperReplied { run_id, result })
            }
            EngineEvent::PauseElapsed { run_id } => Some(chat::Msg::PauseElapsed { run_id }),
            EngineEvent::Contract { ticket, .. } => {
                docbot_warn!("contract reply {} in chat mode", ticket);
                None
            }
        }
    }

    pub fn contract_msg(&mut self, event: EngineEvent) -> Option<contract::Msg> {
        match event {
            EngineEvent::Contract { ticket, result } => {
                let Some(call) = self.contract_calls.remove(&ticket) else {
                    docbot_warn!("reply for unknown request {}", ticket);
                    return None;
                };
                let result = match result {
                    Ok(output) => contract_reply(&call, output),
                    Err(err) => {
                        docbot_warn!("request {} failed: {} ({})", ticket, err, err.kind);
                        Err(err.to_string())
                    }
                };
                Some(contract::Msg::Replied { call, result })
            }
            EngineEvent::Scraper { .. } | EngineEvent::PauseElapsed { .. } => None,
        }
    }
}

pub fn scraper_command(call: &ScraperCall) -> ScraperCommand {
    match call {
        ScraperCall::Scrape { urls } => ScraperCommand::Scrape { urls: urls.clone() },
        ScraperCall::ProcessPdfs => ScraperCommand::ProcessPdfs,
        ScraperCall::CleanDocs => ScraperCommand::CleanDocs,
        ScraperCall::SplitClauses => ScraperCommand::SplitClauses,
        ScraperCall::ClassifyClauses => ScraperCommand::ClassifyClauses,
        ScraperCall::GenerateEmbeddings => ScraperCommand::GenerateEmbeddings,
        ScraperCall::Status => ScraperCommand::Status,
        ScraperCall::Clear => ScraperCommand::Clear,
    }
}

/// Decodes an engine output in the context of the call that produced it.
pub fn scraper_reply(call: &ScraperCall, output: ScraperOutput) -> Result<ScraperReply, String> {
    let reply = match (call, output) {
        (ScraperCall::Scrape { .. }, ScraperOutput::Scraped(response)) => ScraperReply::Scraped(
            response
                .results
                .into_iter()
                .map(|result| ScrapeOutcome {
                    url: result.url,
                    success: result.success,
                })
                .collect(),
        ),
        (_, ScraperOutput::Batch(batch)) => batch_reply(call, batch)?,
        (ScraperCall::Status, ScraperOutput::Status(status)) => {
            ScraperReply::Status(SystemStatus {
                files: FileCounts {
                    raw_docs: status.files.raw_docs,
                    combined_docs: status.files.combined_docs,
                    cleaned_docs: status.files.cleaned_docs,
                    clauses: status.files.clauses,
                    metadata: status.files.metadata,
                },
                models: ModelNames {
                    classification: status.models.llama,
                    embedding: status.models.embedding,
                },
                timestamp: status.timestamp,
            })
        }
        (ScraperCall::Clear, ScraperOutput::Cleared(cleared)) => {
            ScraperReply::Cleared(ClearOutcome {
                success: cleared.success,
                error: cleared.error,
            })
        }
        _ => return Err(UNEXPECTED_OUTPUT.to_string()),
    };
    Ok(reply)
}

fn batch_reply(call: &ScraperCall, batch: BatchResponse) -> Result<ScraperReply, String> {
    let reply = match call {
        ScraperCall::ProcessPdfs => ScraperReply::PdfsProcessed {
            documents: batch.results.len(),
        },
        ScraperCall::CleanDocs => ScraperReply::DocsCleaned {
            documents: batch.results.len(),
        },
        ScraperCall::SplitClauses => ScraperReply::ClausesSplit {
            total_clauses: batch.total_clauses.unwrap_or(0),
        },
        ScraperCall::ClassifyClauses => ScraperReply::ClausesClassified {
            processed: batch.processed.unwrap_or(0),
        },
        ScraperCall::GenerateEmbeddings => ScraperReply::EmbeddingsGenerated {
            processed: batch.processed.unwrap_or(0),
        },
        ScraperCall::Scrape { .. } | ScraperCall::Status | ScraperCall::Clear => {
            return Err(UNEXPECTED_OUTPUT.to_string())
        }
    };
    Ok(reply)
}

pub fn contract_command(call: &ContractCall) -> ContractCommand {
    match call {
        ContractCall::Probe | ContractCall::LoadSettings => ContractCommand::LoadSettings,
        ContractCall::Analyze { query } => ContractCommand::Analyze {
            query: query.clone(),
        },
        ContractCall::Negotiate { topic } => ContractCommand::Analyze {
            query: ContractCall::negotiation_query(topic),
        },
        ContractCall::SearchClauses { term } => ContractCommand::SearchClauses { term: term.clone() },
        ContractCall::Preview { contract_text } => ContractCommand::Preview {
            contract_text: contract_text.clone(),
        },
        ContractCall::LoadHistory => ContractCommand::LoadHistory,
        ContractCall::SaveSettings(settings) => ContractCommand::SaveSettings(SettingsPayload {
            model: Some(settings.model.clone()),
            language: Some(settings.language.clone()),
            auto_save: Some(settings.auto_save),
        }),
    }
}

pub fn contract_reply(call: &ContractCall, output: ContractOutput) -> Result<ContractReply, String> {
    let reply = match (call, output) {
        (ContractCall::Negotiate { .. }, ContractOutput::Analysis(analysis)) => {
            let negotiation = analysis.negotiation().map_err(|err| err.to_string())?;
            ContractReply::Negotiation(NegotiationSummary {
                key_points: negotiation.key_points,
                recommendations: negotiation.recommendations,
                risk_assessment: negotiation.risk_assessment,
            })
        }
        (_, ContractOutput::Analysis(analysis)) => ContractReply::Analysis(AnalysisReply {
            ner_result: analysis.ner_result,
            clause_result: analysis.clause_result,
            negotiation_result: analysis.negotiation_result,
            answer_result: analysis.answer_result,
            contract_text: analysis.contract_text,
        }),
        (_, ContractOutput::Clauses(found)) => ContractReply::ClauseMatches(
            found
                .results
                .into_iter()
                .map(|hit| ClauseMatch {
                    category: hit.category,
                    relevance_score: hit.relevance_score,
                    text: hit.text,
                    risk_type: hit.risk_type,
                })
                .collect(),
        ),
        (_, ContractOutput::Preview(preview)) => ContractReply::Preview(ContractPreview {
            text: preview.contract,
            pages: preview.pages,
            word_count: preview.word_count,
        }),
        (_, ContractOutput::History(history)) => ContractReply::History(
            history
                .history
                .into_iter()
                .map(|item| HistoryEntry {
                    id: item.id,
                    query: item.query,
                    entities_found: item.entities_found,
                    status: item.status,
                    timestamp: item.timestamp,
                })
                .collect(),
        ),
        (_, ContractOutput::Settings(settings)) => ContractReply::Settings(SettingsSnapshot {
            model: settings.model,
            language: settings.language,
            auto_save: settings.auto_save,
        }),
        (_, ContractOutput::SettingsSaved) => ContractReply::SettingsSaved,
    };
    Ok(reply)
}

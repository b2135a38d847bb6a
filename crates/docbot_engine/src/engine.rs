use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use docbot_logging::{docbot_debug, docbot_warn};

use crate::{
    AnalyzeResponse, ApiError, BatchResponse, ClauseSearchResponse, ClearResponse, ContractApi,
    HistoryResponse, Pacer, PreviewResponse, RunId, ScrapeResponse, ScraperApi, SettingsPayload,
    StatusResponse, Ticket,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScraperCommand {
    Scrape { urls: Vec<String> },
    ProcessPdfs,
    CleanDocs,
    SplitClauses,
    ClassifyClauses,
    GenerateEmbeddings,
    Status,
    Clear,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScraperOutput {
    Scraped(ScrapeResponse),
    Batch(BatchResponse),
    Status(StatusResponse),
    Cleared(ClearResponse),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractCommand {
    Analyze { query: String },
    SearchClauses { term: String },
    Preview { contract_text: String },
    LoadHistory,
    LoadSettings,
    SaveSettings(SettingsPayload),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ContractOutput {
    Analysis(AnalyzeResponse),
    Clauses(ClauseSearchResponse),
    Preview(PreviewResponse),
    History(HistoryResponse),
    Settings(SettingsPayload),
    SettingsSaved,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    Scraper {
        run_id: RunId,
        result: Result<ScraperOutput, ApiError>,
    },
    Contract {
        ticket: Ticket,
        result: Result<ContractOutput, ApiError>,
    },
    PauseElapsed {
        run_id: RunId,
    },
}

/// Backends the engine drives.
#[derive(Clone)]
pub struct Services {
    pub scraper: Arc<dyn ScraperApi>,
    pub contract: Arc<dyn ContractApi>,
    pub pacer: Arc<dyn Pacer>,
}

enum EngineCommand {
    Scraper {
        run_id: RunId,
        command: ScraperCommand,
    },
    Contract {
        ticket: Ticket,
        command: ContractCommand,
    },
    Pause {
        run_id: RunId,
        duration: Duration,
    },
}

/// Sending half: submits work to the engine thread.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

/// Receiving half: completions in the order they finish.
pub struct EngineEvents {
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn spawn(services: Services) -> io::Result<(Self, EngineEvents)> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<EngineCommand>();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;

        thread::Builder::new()
            .name("docbot-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let services = services.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        handle_command(&services, command, event_tx).await;
                    });
                }
            })?;

        Ok((Self { cmd_tx }, EngineEvents { event_rx }))
    }

    pub fn call_scraper(&self, run_id: RunId, command: ScraperCommand) {
        self.submit(EngineCommand::Scraper { run_id, command });
    }

    pub fn call_contract(&self, ticket: Ticket, command: ContractCommand) {
        self.submit(EngineCommand::Contract { ticket, command });
    }

    pub fn pause(&self, run_id: RunId, duration: Duration) {
        self.submit(EngineCommand::Pause { run_id, duration });
    }

    fn submit(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            docbot_warn!("engine thread has stopped; command dropped");
        }
    }
}

impl EngineEvents {
    /// Blocks until the next event; `None` once the engine is gone.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    services: &Services,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let event = match command {
        EngineCommand::Scraper { run_id, command } => {
            docbot_debug!("run {} calling {:?}", run_id, command);
            let result = run_scraper(services.scraper.as_ref(), command).await;
            EngineEvent::Scraper { run_id, result }
        }
        EngineCommand::Contract { ticket, command } => {
            docbot_debug!("request {} calling {:?}", ticket, command);
            let result = run_contract(services.contract.as_ref(), command).await;
            EngineEvent::Contract { ticket, result }
        }
        EngineCommand::Pause { run_id, duration } => {
            services.pacer.pause(duration).await;
            EngineEvent::PauseElapsed { run_id }
        }
    };
    let _ = event_tx.send(event);
}

pub async fn run_scraper(
    api: &dyn ScraperApi,
    command: ScraperCommand,
) -> Result<ScraperOutput, ApiError> {
    let output = match command {
        ScraperCommand::Scrape { urls } => ScraperOutput::Scraped(api.scrape(&urls).await?),
        ScraperCommand::ProcessPdfs => ScraperOutput::Batch(api.process_pdfs().await?),
        ScraperCommand::CleanDocs => ScraperOutput::Batch(api.clean_docs().await?),
        ScraperCommand::SplitClauses => ScraperOutput::Batch(api.split_clauses().await?),
        ScraperCommand::ClassifyClauses => ScraperOutput::Batch(api.classify_clauses().await?),
        ScraperCommand::GenerateEmbeddings => {
            ScraperOutput::Batch(api.generate_embeddings().await?)
        }
        ScraperCommand::Status => ScraperOutput::Status(api.status().await?),
        ScraperCommand::Clear => ScraperOutput::Cleared(api.clear().await?),
    };
    Ok(output)
}

pub async fn run_contract(
    api: &dyn ContractApi,
    command: ContractCommand,
) -> Result<ContractOutput, ApiError> {
    let output = match command {
        ContractCommand::Analyze { query } => ContractOutput::Analysis(api.analyze(&query).await?),
        ContractCommand::SearchClauses { term } => {
            ContractOutput::Clauses(api.search_clauses(&term).await?)
        }
        ContractCommand::Preview { contract_text } => {
            ContractOutput::Preview(api.preview_contract(&contract_text).await?)
        }
        ContractCommand::LoadHistory => ContractOutput::History(api.history().await?),
        ContractCommand::LoadSettings => ContractOutput::Settings(api.settings().await?),
        ContractCommand::SaveSettings(settings) => {
            api.save_settings(&settings).await?;
            ContractOutput::SettingsSaved
        }
    };
    Ok(output)
}

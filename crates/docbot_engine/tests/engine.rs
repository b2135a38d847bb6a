use std::sync::{Arc, Mutex};
use std::time::Duration;

use docbot_engine::{
    AnalyzeResponse, ApiError, BatchResponse, ClauseSearchResponse, ClearResponse, ContractApi,
    ContractCommand, ContractOutput, EngineEvent, EngineHandle, FailureKind, HistoryResponse,
    NoPacing, PreviewResponse, ScrapeResponse, ScrapeResult, ScraperApi, ScraperCommand,
    ScraperOutput, Services, SettingsPayload, StatusResponse,
};
use pretty_assertions::assert_eq;

const WAIT: Duration = Duration::from_secs(5);

#[derive(Default)]
struct FakeScraper {
    calls: Mutex<Vec<String>>,
}

impl FakeScraper {
    fn record(&self, name: &str) {
        self.calls.lock().unwrap().push(name.to_string());
    }
}

#[async_trait::async_trait]
impl ScraperApi for FakeScraper {
    async fn scrape(&self, urls: &[String]) -> Result<ScrapeResponse, ApiError> {
        self.record("scrape");
        Ok(ScrapeResponse {
            results: urls
                .iter()
                .map(|url| ScrapeResult {
                    url: url.clone(),
                    success: true,
                    error: None,
                })
                .collect(),
        })
    }

    async fn process_pdfs(&self) -> Result<BatchResponse, ApiError> {
        self.record("process_pdfs");
        Ok(BatchResponse::default())
    }

    async fn clean_docs(&self) -> Result<BatchResponse, ApiError> {
        self.record("clean_docs");
        Ok(BatchResponse::default())
    }

    async fn split_clauses(&self) -> Result<BatchResponse, ApiError> {
        self.record("split_clauses");
        Ok(BatchResponse {
            total_clauses: Some(9),
            ..BatchResponse::default()
        })
    }

    async fn classify_clauses(&self) -> Result<BatchResponse, ApiError> {
        self.record("classify_clauses");
        Ok(BatchResponse::default())
    }

    async fn generate_embeddings(&self) -> Result<BatchResponse, ApiError> {
        self.record("generate_embeddings");
        Ok(BatchResponse::default())
    }

    async fn status(&self) -> Result<StatusResponse, ApiError> {
        self.record("status");
        Err(ApiError {
            kind: FailureKind::HttpStatus(500),
            message: "HTTP 500: Internal Server Error".to_string(),
        })
    }

    async fn clear(&self) -> Result<ClearResponse, ApiError> {
        self.record("clear");
        Ok(ClearResponse {
            success: true,
            error: None,
            message: Some("All data cleared".to_string()),
        })
    }
}

struct FakeContract;

#[async_trait::async_trait]
impl ContractApi for FakeContract {
    async fn analyze(&self, query: &str) -> Result<AnalyzeResponse, ApiError> {
        Ok(AnalyzeResponse {
            ner_result: serde_json::json!({}),
            clause_result: None,
            negotiation_result: serde_json::json!({}),
            answer_result: serde_json::json!({}),
            contract_text: format!("CONTRACT FOR {query}"),
        })
    }

    async fn search_clauses(&self, _term: &str) -> Result<ClauseSearchResponse, ApiError> {
        Ok(ClauseSearchResponse { results: vec![] })
    }

    async fn preview_contract(&self, contract_text: &str) -> Result<PreviewResponse, ApiError> {
        Ok(PreviewResponse {
            contract: contract_text.to_string(),
            pages: Some(1),
            word_count: None,
        })
    }

    async fn history(&self) -> Result<HistoryResponse, ApiError> {
        Ok(HistoryResponse { history: vec![] })
    }

    async fn settings(&self) -> Result<SettingsPayload, ApiError> {
        Ok(SettingsPayload::default())
    }

    async fn save_settings(&self, _settings: &SettingsPayload) -> Result<(), ApiError> {
        Ok(())
    }
}

fn services(scraper: Arc<FakeScraper>) -> Services {
    Services {
        scraper,
        contract: Arc::new(FakeContract),
        pacer: Arc::new(NoPacing),
    }
}

#[test]
fn scraper_results_carry_run_id() {
    let scraper = Arc::new(FakeScraper::default());
    let (engine, events) = EngineHandle::spawn(services(scraper.clone())).unwrap();

    engine.call_scraper(
        4,
        ScraperCommand::Scrape {
            urls: vec!["https://a.example.com".to_string()],
        },
    );

    match events.recv_timeout(WAIT).expect("scrape event") {
        EngineEvent::Scraper { run_id, result } => {
            assert_eq!(run_id, 4);
            match result.unwrap() {
                ScraperOutput::Scraped(response) => assert_eq!(response.results.len(), 1),
                other => panic!("unexpected output: {other:?}"),
            }
        }
        other => panic!("unexpected event: {other:?}"),
    }
    assert_eq!(*scraper.calls.lock().unwrap(), vec!["scrape".to_string()]);
}

#[test]
fn scraper_failures_are_delivered_as_events() {
    let (engine, events) = EngineHandle::spawn(services(Arc::default())).unwrap();

    engine.call_scraper(2, ScraperCommand::Status);

    let event = events.recv_timeout(WAIT).expect("status event");
    assert_eq!(
        event,
        EngineEvent::Scraper {
            run_id: 2,
            result: Err(ApiError {
                kind: FailureKind::HttpStatus(500),
                message: "HTTP 500: Internal Server Error".to_string(),
            }),
        }
    );
}

#[test]
fn pause_elapses_for_run() {
    let (engine, events) = EngineHandle::spawn(services(Arc::default())).unwrap();

    engine.pause(7, Duration::from_millis(1000));

    assert_eq!(
        events.recv_timeout(WAIT),
        Some(EngineEvent::PauseElapsed { run_id: 7 })
    );
}

#[test]
fn contract_results_carry_ticket() {
    let (engine, events) = EngineHandle::spawn(services(Arc::default())).unwrap();

    engine.call_contract(
        11,
        ContractCommand::Analyze {
            query: "NDA".to_string(),
        },
    );

    match events.recv_timeout(WAIT).expect("contract event") {
        EngineEvent::Contract { ticket, result } => {
            assert_eq!(ticket, 11);
            match result.unwrap() {
                ContractOutput::Analysis(analysis) => {
                    assert_eq!(analysis.contract_text, "CONTRACT FOR NDA")
                }
                other => panic!("unexpected output: {other:?}"),
            }
        }
        other => panic!("unexpected event: {other:?}"),
    }

    engine.call_contract(
        12,
        ContractCommand::SaveSettings(SettingsPayload::default()),
    );
    assert_eq!(
        events.recv_timeout(WAIT),
        Some(EngineEvent::Contract {
            ticket: 12,
            result: Ok(ContractOutput::SettingsSaved),
        })
    );
}

//! Docbot engine: HTTP clients for the backends and effect execution.
mod archive;
mod client;
mod contract;
mod engine;
mod pacing;
mod scraper;
mod types;

pub use archive::{ArchiveError, ContractArchive};
pub use client::{ApiSettings, DEFAULT_CONTRACT_API, DEFAULT_SCRAPER_API};
pub use contract::{ContractApi, ReqwestContractApi};
pub use engine::{
    run_contract, run_scraper, ContractCommand, ContractOutput, EngineEvent, EngineEvents,
    EngineHandle, ScraperCommand, ScraperOutput, Services,
};
pub use pacing::{NoPacing, Pacer, TokioPacer};
pub use scraper::{ReqwestScraperApi, ScraperApi};
pub use types::{
    AnalyzeRequest, AnalyzeResponse, ApiError, BatchResponse, ClauseHit, ClauseSearchRequest,
    ClauseSearchResponse, ClearResponse, FailureKind, HistoryItem, HistoryResponse,
    NegotiationResult, PreviewRequest, PreviewResponse, RunId, ScrapeRequest, ScrapeResponse,
    ScrapeResult, SettingsPayload, StatusFiles, StatusModels, StatusResponse, Ticket,
};

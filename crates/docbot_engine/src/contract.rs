use serde_json::Value;

use crate::client::{ApiSettings, JsonClient};
use crate::{
    AnalyzeRequest, AnalyzeResponse, ApiError, ClauseSearchRequest, ClauseSearchResponse,
    HistoryResponse, PreviewRequest, PreviewResponse, SettingsPayload,
};

/// Contract analysis service.
#[async_trait::async_trait]
pub trait ContractApi: Send + Sync {
    async fn analyze(&self, query: &str) -> Result<AnalyzeResponse, ApiError>;
    async fn search_clauses(&self, term: &str) -> Result<ClauseSearchResponse, ApiError>;
    async fn preview_contract(&self, contract_text: &str) -> Result<PreviewResponse, ApiError>;
    async fn history(&self) -> Result<HistoryResponse, ApiError>;
    async fn settings(&self) -> Result<SettingsPayload, ApiError>;
    async fn save_settings(&self, settings: &SettingsPayload) -> Result<(), ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestContractApi {
    client: JsonClient,
}

impl ReqwestContractApi {
    pub fn new(settings: &ApiSettings) -> Result<Self, ApiError> {
        Ok(Self {
            client: JsonClient::new(settings)?,
        })
    }
}

#[async_trait::async_trait]
impl ContractApi for ReqwestContractApi {
    async fn analyze(&self, query: &str) -> Result<AnalyzeResponse, ApiError> {
        self.client.post("/analyze", &AnalyzeRequest { query }).await
    }

    async fn search_clauses(&self, term: &str) -> Result<ClauseSearchResponse, ApiError> {
        self.client
            .post("/clauses/search", &ClauseSearchRequest { search_term: term })
            .await
    }

    async fn preview_contract(&self, contract_text: &str) -> Result<PreviewResponse, ApiError> {
        self.client
            .post("/contract/preview", &PreviewRequest { contract_text })
            .await
    }

    async fn history(&self) -> Result<HistoryResponse, ApiError> {
        self.client.get("/history").await
    }

    async fn settings(&self) -> Result<SettingsPayload, ApiError> {
        self.client.get("/settings").await
    }

    async fn save_settings(&self, settings: &SettingsPayload) -> Result<(), ApiError> {
        // Acknowledgement body carries only a message.
        let _: Value = self.client.post("/settings", settings).await?;
        Ok(())
    }
}

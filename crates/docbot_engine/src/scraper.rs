use crate::client::{ApiSettings, JsonClient};
use crate::{
    ApiError, BatchResponse, ClearResponse, ScrapeRequest, ScrapeResponse, StatusResponse,
};

/// Document scraping and processing service.
#[async_trait::async_trait]
pub trait ScraperApi: Send + Sync {
    async fn scrape(&self, urls: &[String]) -> Result<ScrapeResponse, ApiError>;
    async fn process_pdfs(&self) -> Result<BatchResponse, ApiError>;
    async fn clean_docs(&self) -> Result<BatchResponse, ApiError>;
    async fn split_clauses(&self) -> Result<BatchResponse, ApiError>;
    async fn classify_clauses(&self) -> Result<BatchResponse, ApiError>;
    async fn generate_embeddings(&self) -> Result<BatchResponse, ApiError>;
    async fn status(&self) -> Result<StatusResponse, ApiError>;
    async fn clear(&self) -> Result<ClearResponse, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestScraperApi {
    client: JsonClient,
}

impl ReqwestScraperApi {
    pub fn new(settings: &ApiSettings) -> Result<Self, ApiError> {
        Ok(Self {
            client: JsonClient::new(settings)?,
        })
    }
}

#[async_trait::async_trait]
impl ScraperApi for ReqwestScraperApi {
    async fn scrape(&self, urls: &[String]) -> Result<ScrapeResponse, ApiError> {
        self.client.post("/scrape", &ScrapeRequest { urls }).await
    }

    async fn process_pdfs(&self) -> Result<BatchResponse, ApiError> {
        self.client.trigger("/process-pdfs").await
    }

    async fn clean_docs(&self) -> Result<BatchResponse, ApiError> {
        self.client.trigger("/clean-docs").await
    }

    async fn split_clauses(&self) -> Result<BatchResponse, ApiError> {
        self.client.trigger("/split-clauses").await
    }

    async fn classify_clauses(&self) -> Result<BatchResponse, ApiError> {
        self.client.trigger("/classify-clauses").await
    }

    async fn generate_embeddings(&self) -> Result<BatchResponse, ApiError> {
        self.client.trigger("/generate-embeddings").await
    }

    async fn status(&self) -> Result<StatusResponse, ApiError> {
        self.client.get("/status").await
    }

    async fn clear(&self) -> Result<ClearResponse, ApiError> {
        self.client.trigger("/clear").await
    }
}

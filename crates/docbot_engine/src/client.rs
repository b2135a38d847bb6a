use std::time::Duration;

use docbot_logging::{docbot_debug, docbot_warn};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::{ApiError, FailureKind};

pub const DEFAULT_SCRAPER_API: &str = "http://localhost:5000/api";
pub const DEFAULT_CONTRACT_API: &str = "http://localhost:5001/api";

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    /// Processing endpoints can run for minutes; unbounded unless set.
    pub request_timeout: Option<Duration>,
}

impl ApiSettings {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
        }
    }

    pub fn scraper_default() -> Self {
        Self::new(DEFAULT_SCRAPER_API)
    }

    pub fn contract_default() -> Self {
        Self::new(DEFAULT_CONTRACT_API)
    }
}

/// JSON-over-HTTP client rooted at an API base url.
#[derive(Debug, Clone)]
pub(crate) struct JsonClient {
    client: reqwest::Client,
    base: String,
}

impl JsonClient {
    pub(crate) fn new(settings: &ApiSettings) -> Result<Self, ApiError> {
        let parsed = Url::parse(&settings.base_url)
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::new(
                FailureKind::InvalidUrl,
                format!("unsupported scheme: {}", parsed.scheme()),
            ));
        }

        let mut builder = reqwest::Client::builder().connect_timeout(settings.connect_timeout);
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;

        Ok(Self {
            client,
            base: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.client.request(Method::GET, self.endpoint(path)?);
        self.send(request, Method::GET, path).await
    }

    pub(crate) async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.client.request(Method::POST, self.endpoint(path)?).json(body);
        self.send(request, Method::POST, path).await
    }

    /// POST with no request body.
    pub(crate) async fn trigger<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.client.request(Method::POST, self.endpoint(path)?);
        self.send(request, Method::POST, path).await
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Url::parse(&format!("{}{}", self.base, path))
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        method: Method,
        path: &str,
    ) -> Result<T, ApiError> {
        docbot_debug!("{} {}{}", method, self.base, path);
        let response = request.send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            docbot_warn!("{} {} answered {}", method, path, status);
            return Err(ApiError::new(
                FailureKind::HttpStatus(status.as_u16()),
                format!(
                    "HTTP {}: {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("Unknown Status")
                ),
            ));
        }

        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        serde_json::from_slice(&bytes).map_err(|err| {
            ApiError::new(
                FailureKind::Decode,
                format!("invalid response from {path}: {err}"),
            )
        })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}

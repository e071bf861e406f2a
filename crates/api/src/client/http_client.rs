use std::time::Duration;

use core_types::config::BackendConfig;
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use super::VectorBackend;
use crate::{
    AckResponse, ApiError, CreateCollectionRequest, DeleteCollectionRequest, DeleteRequest,
    DetailsRequest, DetailsResponse, Endpoint, InsertRequest, ResourcesQuery, ResourcesResponse,
    SearchRequest, SearchResponse,
};

/// JSON-over-HTTP client for the vector-store backend.
///
/// Each call issues exactly one request. There is no retry: a failed call is
/// reported once and left to the caller.
#[derive(Debug, Clone)]
pub struct HttpClient {
    http: Client,
    base_url: String,
    request_timeout: Duration,
    connect_timeout: Duration,
}

impl HttpClient {
    /// Client for `base_url` (e.g. `http://localhost:8000`) with the default
    /// timeouts; trailing slashes are stripped.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        Self::from_config(&BackendConfig {
            base_url: base_url.into(),
            ..BackendConfig::default()
        })
    }

    pub fn from_config(cfg: &BackendConfig) -> Result<Self, ApiError> {
        Self::build(
            cfg.base_url.clone(),
            Duration::from_millis(cfg.request_timeout_ms),
            Duration::from_millis(cfg.connect_timeout_ms),
        )
    }

    pub fn with_request_timeout(self, timeout: Duration) -> Result<Self, ApiError> {
        Self::build(self.base_url, timeout, self.connect_timeout)
    }

    pub fn with_connect_timeout(self, timeout: Duration) -> Result<Self, ApiError> {
        Self::build(self.base_url, self.request_timeout, timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    fn build(
        base_url: String,
        request_timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self, ApiError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(ApiError::InvalidBaseUrl(base_url));
        }

        let http = Client::builder()
            .timeout(request_timeout)
            .connect_timeout(connect_timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: trimmed.to_string(),
            request_timeout,
            connect_timeout,
        })
    }

    async fn post<Req: Serialize + ?Sized>(
        &self,
        endpoint: Endpoint,
        body: &Req,
    ) -> Result<Vec<u8>, ApiError> {
        let req = self.http.post(self.url(endpoint)).json(body);
        self.execute(endpoint, req).await
    }

    async fn get<Q: Serialize + ?Sized>(
        &self,
        endpoint: Endpoint,
        query: &Q,
    ) -> Result<Vec<u8>, ApiError> {
        let req = self.http.get(self.url(endpoint)).query(query);
        self.execute(endpoint, req).await
    }

    async fn execute(&self, endpoint: Endpoint, req: RequestBuilder) -> Result<Vec<u8>, ApiError> {
        debug!(%endpoint, base = %self.base_url, "sending request");
        let resp = req.send().await?;
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                endpoint,
                status: status.as_u16(),
                body,
            });
        }

        let bytes = resp.bytes().await?;
        debug!(%endpoint, status = status.as_u16(), len = bytes.len(), "response received");
        Ok(bytes.to_vec())
    }
}

fn decode_strict<T: DeserializeOwned>(endpoint: Endpoint, bytes: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(bytes).map_err(|source| ApiError::Decode { endpoint, source })
}

/// Mutation acknowledgements are informational; an odd body is not a failure.
fn decode_ack(endpoint: Endpoint, bytes: &[u8]) -> AckResponse {
    if bytes.is_empty() {
        return AckResponse::default();
    }
    serde_json::from_slice(bytes).unwrap_or_else(|err| {
        warn!(%endpoint, error = %err, "acknowledgement body not understood; ignoring");
        AckResponse::default()
    })
}

/// Bodies that are only logged: non-JSON text is kept as a string value.
fn decode_loose<T>(bytes: &[u8], wrap: impl FnOnce(Value) -> T) -> T
where
    T: DeserializeOwned,
{
    serde_json::from_slice(bytes).unwrap_or_else(|_| {
        wrap(Value::String(String::from_utf8_lossy(bytes).into_owned()))
    })
}

impl VectorBackend for HttpClient {
    async fn search(&self, req: SearchRequest) -> Result<SearchResponse, ApiError> {
        let bytes = self.post(Endpoint::SearchVectors, &req).await?;
        decode_strict(Endpoint::SearchVectors, &bytes)
    }

    async fn insert(&self, req: InsertRequest) -> Result<AckResponse, ApiError> {
        let bytes = self.post(Endpoint::InsertData, &req).await?;
        Ok(decode_ack(Endpoint::InsertData, &bytes))
    }

    async fn delete(&self, req: DeleteRequest) -> Result<AckResponse, ApiError> {
        let bytes = self.post(Endpoint::DeleteData, &req).await?;
        Ok(decode_ack(Endpoint::DeleteData, &bytes))
    }

    async fn create_collection(
        &self,
        req: CreateCollectionRequest,
    ) -> Result<AckResponse, ApiError> {
        let bytes = self.post(Endpoint::CreateCollection, &req).await?;
        Ok(decode_ack(Endpoint::CreateCollection, &bytes))
    }

    async fn delete_collection(
        &self,
        req: DeleteCollectionRequest,
    ) -> Result<AckResponse, ApiError> {
        let bytes = self.post(Endpoint::DeleteCollection, &req).await?;
        Ok(decode_ack(Endpoint::DeleteCollection, &bytes))
    }

    async fn details(&self, req: DetailsRequest) -> Result<DetailsResponse, ApiError> {
        let bytes = self.post(Endpoint::Details, &req).await?;
        Ok(decode_loose(&bytes, DetailsResponse::Other))
    }

    async fn resources(&self, query: ResourcesQuery) -> Result<ResourcesResponse, ApiError> {
        let bytes = self.get(Endpoint::Resources, &query).await?;
        Ok(decode_loose(&bytes, ResourcesResponse::Other))
    }
}

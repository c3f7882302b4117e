//! MongoDB Atlas Data API client.
//!
//! Production-grade client with:
//! - Static api-key authentication
//! - HTTP client tuning (pooling, timeouts)
//! - Exponential backoff with jitter
//! - Observability (tracing spans, metrics)

use std::time::{Duration, Instant};

use reqwest::{header, Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{info_span, Instrument};

use crate::error::{StoreError, StoreResult};
use crate::metrics::record_request;
use crate::retry::{with_retry, RetryConfig};
use crate::types::{
    ActionRequest, DeleteResult, FindOneResponse, FindResponse, InsertOneResult, UpdateResult,
};

/// Data API client configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Data API base URL, up to and including the API version segment.
    pub base_url: String,
    /// Data API key
    pub api_key: String,
    /// Cluster name ("dataSource" in request bodies)
    pub data_source: String,
    /// Database name
    pub database: String,
    /// Request timeout
    pub timeout: Duration,
    /// Connect timeout
    pub connect_timeout: Duration,
    /// Retry configuration
    pub retry: RetryConfig,
}

impl StoreConfig {
    /// Create config from environment variables.
    pub fn from_env() -> StoreResult<Self> {
        let base_url = std::env::var("DATA_API_BASE_URL").map_err(|_| {
            StoreError::request_failed("DATA_API_BASE_URL must be set to reach the document store")
        })?;

        let api_key = std::env::var("DATA_API_KEY")
            .map_err(|_| StoreError::Unauthorized("DATA_API_KEY must be set".to_string()))?;

        if api_key.is_empty() {
            return Err(StoreError::Unauthorized(
                "DATA_API_KEY cannot be empty".to_string(),
            ));
        }

        let connect_timeout_secs: u64 = std::env::var("STORE_CONNECT_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(5);

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            data_source: std::env::var("DATA_SOURCE").unwrap_or_else(|_| "Cluster0".to_string()),
            database: std::env::var("DATABASE_NAME")
                .unwrap_or_else(|_| "CareerCanvas".to_string()),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(connect_timeout_secs),
            retry: RetryConfig::from_env(),
        })
    }
}

/// MongoDB Atlas Data API client.
///
/// One instance is created at startup and shared across requests; reqwest
/// pools connections internally, so clones are cheap handles onto the same
/// pool.
#[derive(Clone)]
pub struct DataApiClient {
    http: Client,
    config: StoreConfig,
}

impl DataApiClient {
    /// Create a new Data API client.
    pub fn new(config: StoreConfig) -> StoreResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(10)
            .user_agent(concat!("canvas-store/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(StoreError::Network)?;

        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> StoreResult<Self> {
        Self::new(StoreConfig::from_env()?)
    }

    /// Database this client is bound to.
    pub fn database(&self) -> &str {
        &self.config.database
    }

    fn action_url(&self, action: &str) -> String {
        format!("{}/action/{}", self.config.base_url, action)
    }

    fn envelope(&self, collection: &str) -> ActionRequest {
        ActionRequest::new(
            self.config.data_source.clone(),
            self.config.database.clone(),
            collection,
        )
    }

    // =========================================================================
    // CRUD Operations
    // =========================================================================

    /// Find documents matching a filter, optionally sorted and limited.
    pub async fn find<T: DeserializeOwned>(
        &self,
        collection: &str,
        filter: Value,
        sort: Option<Value>,
        limit: Option<i64>,
    ) -> StoreResult<Vec<T>> {
        let mut request = self.envelope(collection);
        request.filter = Some(filter);
        request.sort = sort;
        request.limit = limit;

        let response: FindResponse<T> = self.run_action("find", collection, &request).await?;
        Ok(response.documents)
    }

    /// Find a single document. A miss is `Ok(None)`, not an error.
    pub async fn find_one<T: DeserializeOwned>(
        &self,
        collection: &str,
        filter: Value,
    ) -> StoreResult<Option<T>> {
        let mut request = self.envelope(collection);
        request.filter = Some(filter);

        let response: FindOneResponse<T> =
            self.run_action("findOne", collection, &request).await?;
        Ok(response.document)
    }

    /// Insert a single document.
    pub async fn insert_one(&self, collection: &str, document: Value) -> StoreResult<InsertOneResult> {
        let mut request = self.envelope(collection);
        request.document = Some(document);

        self.run_action("insertOne", collection, &request).await
    }

    /// Update a single document matching the filter.
    ///
    /// With `upsert` set, a non-matching filter creates a new document and
    /// the result carries its `upserted_id`.
    pub async fn update_one(
        &self,
        collection: &str,
        filter: Value,
        update: Value,
        upsert: bool,
    ) -> StoreResult<UpdateResult> {
        let mut request = self.envelope(collection);
        request.filter = Some(filter);
        request.update = Some(update);
        request.upsert = upsert.then_some(true);

        self.run_action("updateOne", collection, &request).await
    }

    /// Delete a single document matching the filter. Deleting a missing
    /// document reports `deleted_count: 0`.
    pub async fn delete_one(&self, collection: &str, filter: Value) -> StoreResult<DeleteResult> {
        let mut request = self.envelope(collection);
        request.filter = Some(filter);

        self.run_action("deleteOne", collection, &request).await
    }

    // =========================================================================
    // Internal Helpers
    // =========================================================================

    /// Post an action request with retry, tracing and metrics.
    async fn run_action<R: DeserializeOwned>(
        &self,
        action: &str,
        collection: &str,
        request: &ActionRequest,
    ) -> StoreResult<R> {
        let url = self.action_url(action);
        let span = info_span!("store_request", action = %action, collection = %collection);

        let start = Instant::now();
        let result = with_retry(&self.config.retry, action, || self.attempt(&url, request))
            .instrument(span)
            .await;
        let latency_ms = start.elapsed().as_millis() as f64;

        let status = match &result {
            Ok(_) => 200,
            Err(e) => e.http_status().unwrap_or(500),
        };
        record_request(action, status, latency_ms);

        result
    }

    /// A single request attempt without retry.
    async fn attempt<R: DeserializeOwned>(&self, url: &str, request: &ActionRequest) -> StoreResult<R> {
        let response = self
            .http
            .post(url)
            .header("api-key", &self.config.api_key)
            // Ask for relaxed JSON so ids come back as plain strings.
            .header(header::ACCEPT, "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        match status {
            StatusCode::OK | StatusCode::CREATED => {
                let body = response.text().await?;
                serde_json::from_str(&body).map_err(|e| {
                    StoreError::invalid_response(format!(
                        "Failed to parse {} response: {} (body prefix: {})",
                        url,
                        e,
                        &body[..body.len().min(200)]
                    ))
                })
            }
            _ => {
                let retry_after_ms = response
                    .headers()
                    .get(header::RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.parse::<u64>().ok())
                    .map(|secs| secs * 1000);
                let body = response.text().await.unwrap_or_default();
                Err(StoreError::from_http_status(
                    status.as_u16(),
                    format!("{} failed: {}", url, body),
                    retry_after_ms,
                ))
            }
        }
    }
}

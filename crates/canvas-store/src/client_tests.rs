//! Tests for Data API client functionality.

use std::time::Duration;

use serde_json::json;
use serial_test::serial;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use canvas_models::{Bid, Job, ObjectId};

use crate::client::{DataApiClient, StoreConfig};
use crate::error::StoreError;
use crate::repos::{BidRepository, JobRepository};
use crate::retry::RetryConfig;
use crate::sorting::SortSpec;
use crate::types::id_filter;

// =============================================================================
// Test Helpers
// =============================================================================

fn test_config(base_url: String) -> StoreConfig {
    StoreConfig {
        base_url,
        api_key: "test-key".to_string(),
        data_source: "Cluster0".to_string(),
        database: "CareerCanvas".to_string(),
        timeout: Duration::from_secs(5),
        connect_timeout: Duration::from_secs(2),
        retry: RetryConfig {
            max_retries: 2,
            base_delay_ms: 10,
            max_delay_ms: 50,
        },
    }
}

fn test_client(server: &MockServer) -> DataApiClient {
    DataApiClient::new(test_config(server.uri())).unwrap()
}

fn oid(s: &str) -> ObjectId {
    ObjectId::parse(s).unwrap()
}

// =============================================================================
// Error Type Tests
// =============================================================================

#[test]
fn test_error_from_http_status_401() {
    let err = StoreError::from_http_status(401, "invalid key".into(), None);
    assert!(matches!(err, StoreError::Unauthorized(_)));
    assert!(!err.is_retryable());
}

#[test]
fn test_error_from_http_status_429() {
    let err = StoreError::from_http_status(429, "rate limited".into(), Some(2000));
    assert!(matches!(err, StoreError::RateLimited(2000)));
    assert!(err.is_retryable());
    assert_eq!(err.retry_after_ms(), Some(2000));
}

#[test]
fn test_error_from_http_status_500() {
    let err = StoreError::from_http_status(500, "internal".into(), None);
    assert!(matches!(err, StoreError::ServerError(500, _)));
    assert!(err.is_retryable());
}

#[test]
fn test_error_from_http_status_400() {
    let err = StoreError::from_http_status(400, "bad request".into(), None);
    assert!(matches!(err, StoreError::RequestFailed(_)));
    assert!(!err.is_retryable());
}

#[test]
fn test_error_http_status_getter() {
    assert_eq!(StoreError::RateLimited(1000).http_status(), Some(429));
    assert_eq!(
        StoreError::ServerError(502, "bad gateway".into()).http_status(),
        Some(502)
    );
    assert_eq!(StoreError::NotFound("x".into()).http_status(), Some(404));
    assert_eq!(StoreError::RequestFailed("x".into()).http_status(), None);
}

// =============================================================================
// Client Tests (wiremock)
// =============================================================================

#[tokio::test]
async fn test_find_sends_envelope_and_api_key() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/action/find"))
        .and(header("api-key", "test-key"))
        .and(body_partial_json(json!({
            "dataSource": "Cluster0",
            "database": "CareerCanvas",
            "collection": "jobs",
            "filter": {"email": "a@x.com"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "documents": [
                {"_id": "65b2f0c4a1d2e3f4a5b6c7d8", "email": "a@x.com", "title": "Logo design"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let repo = JobRepository::new(test_client(&server));
    let jobs = repo.posted_by("a@x.com").await.unwrap();

    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].title.as_deref(), Some("Logo design"));
    assert_eq!(jobs[0].id.as_ref().unwrap().as_str(), "65b2f0c4a1d2e3f4a5b6c7d8");
}

#[tokio::test]
async fn test_find_one_miss_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/action/findOne"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"document": null})))
        .mount(&server)
        .await;

    let repo = JobRepository::new(test_client(&server));
    let job = repo.find_by_id(&oid("65b2f0c4a1d2e3f4a5b6c7d8")).await.unwrap();
    assert!(job.is_none());
}

#[tokio::test]
async fn test_find_one_filters_by_extended_json_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/action/findOne"))
        .and(body_partial_json(json!({
            "filter": {"_id": {"$oid": "65b2f0c4a1d2e3f4a5b6c7d8"}}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "document": {"_id": "65b2f0c4a1d2e3f4a5b6c7d8", "email": "a@x.com"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let repo = JobRepository::new(test_client(&server));
    let job = repo.find_by_id(&oid("65b2f0c4a1d2e3f4a5b6c7d8")).await.unwrap();
    assert_eq!(job.unwrap().email.as_deref(), Some("a@x.com"));
}

#[tokio::test]
async fn test_insert_one_returns_inserted_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/action/insertOne"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "insertedId": "65b2f0c4a1d2e3f4a5b6c7d8"
        })))
        .mount(&server)
        .await;

    let job: Job = serde_json::from_value(json!({"email": "a@x.com", "title": "x"})).unwrap();
    let repo = JobRepository::new(test_client(&server));
    let result = repo.insert(&job).await.unwrap();
    assert_eq!(result.inserted_id, json!("65b2f0c4a1d2e3f4a5b6c7d8"));
}

#[tokio::test]
async fn test_update_one_upsert_reports_upserted_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/action/updateOne"))
        .and(body_partial_json(json!({"upsert": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "matchedCount": 0,
            "modifiedCount": 0,
            "upsertedId": "65b2f0c4aaaaaaaaaaaaaaaa"
        })))
        .mount(&server)
        .await;

    let repo = JobRepository::new(test_client(&server));
    let update = serde_json::from_value(json!({"title": "New title"})).unwrap();
    let result = repo.update(&oid("65b2f0c4a1d2e3f4a5b6c7d8"), &update).await.unwrap();

    assert_eq!(result.matched_count, 0);
    assert_eq!(result.upserted_id, Some(json!("65b2f0c4aaaaaaaaaaaaaaaa")));
}

#[tokio::test]
async fn test_delete_one_missing_id_reports_zero() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/action/deleteOne"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"deletedCount": 0})))
        .mount(&server)
        .await;

    let repo = JobRepository::new(test_client(&server));
    let result = repo.delete(&oid("65b2f0c4a1d2e3f4a5b6c7d8")).await.unwrap();
    assert_eq!(result.deleted_count, 0);
}

#[tokio::test]
async fn test_sorted_bids_send_allow_listed_sort_document() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/action/find"))
        .and(body_partial_json(json!({
            "collection": "bids",
            "filter": {"bidderEmail": "b@x.com"},
            "sort": {"price": -1}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "documents": [
                {"bidderEmail": "b@x.com", "price": 300},
                {"bidderEmail": "b@x.com", "price": 100}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let repo = BidRepository::new(test_client(&server));
    let sort = SortSpec::from_params(Some("price"), Some("desc"));
    let bids: Vec<Bid> = repo.placed_by_sorted("b@x.com", &sort).await.unwrap();
    assert_eq!(bids.len(), 2);
}

#[tokio::test]
async fn test_server_error_is_retried_until_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/action/find"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/action/find"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"documents": []})))
        .mount(&server)
        .await;

    let repo = JobRepository::new(test_client(&server));
    let jobs = repo.posted_by("a@x.com").await.unwrap();
    assert!(jobs.is_empty());
}

#[tokio::test]
async fn test_bad_request_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/action/find"))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad filter"))
        .expect(1)
        .mount(&server)
        .await;

    let repo = JobRepository::new(test_client(&server));
    let err = repo.posted_by("a@x.com").await.unwrap_err();
    assert!(matches!(err, StoreError::RequestFailed(_)));
}

#[tokio::test]
async fn test_garbage_response_is_invalid_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/action/findOne"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client
        .find_one::<Job>("jobs", id_filter(&oid("65b2f0c4a1d2e3f4a5b6c7d8")))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::InvalidResponse(_)));
}

// =============================================================================
// Config Tests
// =============================================================================

#[test]
#[serial]
fn test_config_requires_base_url() {
    std::env::remove_var("DATA_API_BASE_URL");
    std::env::set_var("DATA_API_KEY", "key");
    assert!(StoreConfig::from_env().is_err());
}

#[test]
#[serial]
fn test_config_rejects_empty_api_key() {
    std::env::set_var("DATA_API_BASE_URL", "https://data.example.com/v1");
    std::env::set_var("DATA_API_KEY", "");
    assert!(StoreConfig::from_env().is_err());
}

#[test]
#[serial]
fn test_config_defaults() {
    std::env::set_var("DATA_API_BASE_URL", "https://data.example.com/v1/");
    std::env::set_var("DATA_API_KEY", "key");
    std::env::remove_var("DATA_SOURCE");
    std::env::remove_var("DATABASE_NAME");
    std::env::remove_var("STORE_CONNECT_TIMEOUT_SECS");

    let config = StoreConfig::from_env().unwrap();
    assert_eq!(config.base_url, "https://data.example.com/v1");
    assert_eq!(config.data_source, "Cluster0");
    assert_eq!(config.database, "CareerCanvas");
    assert_eq!(config.connect_timeout, Duration::from_secs(5));
}

#[test]
#[serial]
fn test_config_handles_invalid_env_values() {
    std::env::set_var("DATA_API_BASE_URL", "https://data.example.com/v1");
    std::env::set_var("DATA_API_KEY", "key");
    std::env::set_var("STORE_CONNECT_TIMEOUT_SECS", "not-a-number");
    let config = StoreConfig::from_env().unwrap();
    assert_eq!(config.connect_timeout, Duration::from_secs(5));
}

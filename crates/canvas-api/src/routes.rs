//! API routes.

use axum::middleware;
use axum::routing::{get, post, put};
use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::limit::RequestBodyLimitLayer;

use crate::handlers::bids::{bid_requests, create_bid, my_bids, sorted_bids, update_bid_status};
use crate::handlers::comments::create_comment;
use crate::handlers::health::{health, root};
use crate::handlers::jobs::{
    create_job, delete_job, find_job, jobs_by_category, posted_jobs, update_job,
};
use crate::handlers::session::{issue_token, logout};
use crate::metrics::metrics_middleware;
use crate::middleware::{cors_layer, request_id, request_logging, security_headers};
use crate::state::AppState;

/// Create the API router.
///
/// Auth is not a route layer: handlers that require a verified identity
/// take the `AuthUser` extractor, so the unauthenticated-eligible routes
/// simply don't.
pub fn create_router(state: AppState, metrics_handle: Option<PrometheusHandle>) -> Router {
    let session_routes = Router::new()
        .route("/jwt", post(issue_token))
        .route("/logout", post(logout));

    let job_routes = Router::new()
        // Listing and deletion share the one-segment pattern; the path
        // param is an email for GET and a document id for DELETE.
        .route("/postedJobs/:email", get(posted_jobs).delete(delete_job))
        .route("/postedJobs/find/:id", get(find_job))
        .route("/jobs", post(create_job))
        .route("/jobs/:categories", get(jobs_by_category))
        .route("/jobs/update/:id", put(update_job));

    let bid_routes = Router::new()
        .route("/bids", post(create_bid))
        .route("/bids/find/:email", get(my_bids))
        .route("/bidRequests/:email", get(bid_requests))
        .route("/bidRequests/status/:id", put(update_bid_status))
        .route("/sorting/:email", get(sorted_bids));

    let comment_routes = Router::new().route("/comments", post(create_comment));

    let health_routes = Router::new()
        .route("/", get(root))
        .route("/health", get(health));

    // Metrics endpoint (if enabled)
    let metrics_routes = if let Some(handle) = metrics_handle {
        Router::new().route("/metrics", get(move || async move { handle.render() }))
    } else {
        Router::new()
    };

    Router::new()
        .merge(session_routes)
        .merge(job_routes)
        .merge(bid_routes)
        .merge(comment_routes)
        .merge(health_routes)
        .merge(metrics_routes)
        .layer(RequestBodyLimitLayer::new(state.config.max_body_size))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(security_headers))
        .layer(middleware::from_fn(request_id))
        .layer(middleware::from_fn(request_logging))
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}

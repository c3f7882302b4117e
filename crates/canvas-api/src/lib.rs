//! Axum HTTP API server for the CareerCanvas job marketplace.
//!
//! This crate provides:
//! - Cookie-based JWT authentication and the ownership guard
//! - CRUD handlers for jobs, bids and comments
//! - Request logging, security headers and Prometheus metrics

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod state;

pub use auth::{AuthUser, Claims, TokenService};
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;

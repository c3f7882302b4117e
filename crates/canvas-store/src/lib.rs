//! MongoDB Atlas Data API client.
//!
//! This crate provides:
//! - A pooled HTTPS client for the Data API action endpoints
//! - Typed repositories for jobs, bids and comments
//! - An allow-listed sort layer for caller-supplied sort parameters
//! - Retry with exponential backoff and request metrics

pub mod client;
pub mod error;
pub mod metrics;
pub mod repos;
pub mod retry;
pub mod sorting;
pub mod types;

pub use client::{DataApiClient, StoreConfig};
pub use error::{StoreError, StoreResult};
pub use repos::{BidRepository, CommentRepository, JobRepository};
pub use sorting::{BidSortField, SortDirection, SortSpec};
pub use types::{DeleteResult, InsertOneResult, UpdateResult};

#[cfg(test)]
mod client_tests;

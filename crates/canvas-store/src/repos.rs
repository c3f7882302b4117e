//! Typed repositories for jobs, bids and comments.

use serde_json::json;
use tracing::info;

use canvas_models::{Bid, BidStatusUpdate, Comment, Job, JobUpdate, ObjectId};

use crate::client::DataApiClient;
use crate::error::StoreResult;
use crate::sorting::SortSpec;
use crate::types::{field_filter, id_filter, DeleteResult, InsertOneResult, UpdateResult};

/// Collection names within the marketplace database.
pub mod collections {
    pub const JOBS: &str = "jobs";
    pub const BIDS: &str = "bids";
    pub const COMMENTS: &str = "comments";
}

/// Repository for job documents.
pub struct JobRepository {
    client: DataApiClient,
}

impl JobRepository {
    pub fn new(client: DataApiClient) -> Self {
        Self { client }
    }

    /// Jobs posted by an owner.
    pub async fn posted_by(&self, email: &str) -> StoreResult<Vec<Job>> {
        self.client
            .find(collections::JOBS, field_filter("email", email), None, None)
            .await
    }

    /// Jobs whose category field exactly equals the given value.
    pub async fn in_category(&self, categories: &str) -> StoreResult<Vec<Job>> {
        self.client
            .find(
                collections::JOBS,
                field_filter("categories", categories),
                None,
                None,
            )
            .await
    }

    /// Look up a single job by id.
    pub async fn find_by_id(&self, id: &ObjectId) -> StoreResult<Option<Job>> {
        self.client.find_one(collections::JOBS, id_filter(id)).await
    }

    /// Insert a new job posting.
    pub async fn insert(&self, job: &Job) -> StoreResult<InsertOneResult> {
        let result = self
            .client
            .insert_one(collections::JOBS, serde_json::to_value(job)?)
            .await?;
        info!(inserted_id = %result.inserted_id, "Created job posting");
        Ok(result)
    }

    /// Delete a job by id. Missing ids report zero deleted.
    pub async fn delete(&self, id: &ObjectId) -> StoreResult<DeleteResult> {
        self.client.delete_one(collections::JOBS, id_filter(id)).await
    }

    /// Apply a whitelisted update to a job.
    ///
    /// Upsert is on: a missing id creates a fresh document with a
    /// store-generated id, matching the marketplace's historical behavior.
    pub async fn update(&self, id: &ObjectId, update: &JobUpdate) -> StoreResult<UpdateResult> {
        self.client
            .update_one(
                collections::JOBS,
                id_filter(id),
                json!({ "$set": serde_json::to_value(update)? }),
                true,
            )
            .await
    }
}

/// Repository for bid documents.
pub struct BidRepository {
    client: DataApiClient,
}

impl BidRepository {
    pub fn new(client: DataApiClient) -> Self {
        Self { client }
    }

    /// Insert a new bid.
    pub async fn insert(&self, bid: &Bid) -> StoreResult<InsertOneResult> {
        let result = self
            .client
            .insert_one(collections::BIDS, serde_json::to_value(bid)?)
            .await?;
        info!(inserted_id = %result.inserted_id, "Created bid");
        Ok(result)
    }

    /// Bids placed by a bidder.
    pub async fn placed_by(&self, email: &str) -> StoreResult<Vec<Bid>> {
        self.client
            .find(
                collections::BIDS,
                field_filter("bidderEmail", email),
                None,
                None,
            )
            .await
    }

    /// Bids received against a buyer's postings.
    pub async fn requested_of(&self, email: &str) -> StoreResult<Vec<Bid>> {
        self.client
            .find(
                collections::BIDS,
                field_filter("buyerEmail", email),
                None,
                None,
            )
            .await
    }

    /// Bids placed by a bidder, sorted by an allow-listed field.
    pub async fn placed_by_sorted(&self, email: &str, sort: &SortSpec) -> StoreResult<Vec<Bid>> {
        self.client
            .find(
                collections::BIDS,
                field_filter("bidderEmail", email),
                Some(sort.to_document()),
                None,
            )
            .await
    }

    /// Move a bid's status. Same upsert caveat as job updates.
    pub async fn set_status(
        &self,
        id: &ObjectId,
        update: &BidStatusUpdate,
    ) -> StoreResult<UpdateResult> {
        self.client
            .update_one(
                collections::BIDS,
                id_filter(id),
                json!({ "$set": {
                    "status": &update.status,
                    "statusNum": update.effective_status_num(),
                }}),
                true,
            )
            .await
    }
}

/// Repository for comment documents.
pub struct CommentRepository {
    client: DataApiClient,
}

impl CommentRepository {
    pub fn new(client: DataApiClient) -> Self {
        Self { client }
    }

    /// Append a comment. No ownership check by design of the surface.
    pub async fn insert(&self, comment: &Comment) -> StoreResult<InsertOneResult> {
        self.client
            .insert_one(collections::COMMENTS, serde_json::to_value(comment)?)
            .await
    }
}

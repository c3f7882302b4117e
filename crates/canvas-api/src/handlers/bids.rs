//! Bid API handlers.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use canvas_models::{Bid, BidStatusUpdate, ObjectId};
use canvas_store::{BidRepository, InsertOneResult, SortSpec, UpdateResult};

use crate::auth::{ensure_owner, AuthUser};
use crate::error::{ApiError, ApiResult};
use crate::handlers::OwnerQuery;
use crate::state::AppState;

fn repo(state: &AppState) -> BidRepository {
    BidRepository::new((*state.store).clone())
}

/// Place a bid against a job.
pub async fn create_bid(
    State(state): State<AppState>,
    Query(query): Query<OwnerQuery>,
    user: AuthUser,
    Json(bid): Json<Bid>,
) -> ApiResult<Json<InsertOneResult>> {
    ensure_owner(&user, query.owner())?;
    Ok(Json(repo(&state).insert(&bid).await?))
}

/// Bids the caller has placed. The path email is the owner descriptor.
pub async fn my_bids(
    State(state): State<AppState>,
    Path(email): Path<String>,
    user: AuthUser,
) -> ApiResult<Json<Vec<Bid>>> {
    ensure_owner(&user, &email)?;
    Ok(Json(repo(&state).placed_by(&email).await?))
}

/// Bids received against the caller's job postings.
pub async fn bid_requests(
    State(state): State<AppState>,
    Path(email): Path<String>,
    user: AuthUser,
) -> ApiResult<Json<Vec<Bid>>> {
    ensure_owner(&user, &email)?;
    Ok(Json(repo(&state).requested_of(&email).await?))
}

/// Sort parameters for the public bid listing.
#[derive(Debug, Deserialize)]
pub struct SortQuery {
    #[serde(rename = "sortField")]
    pub sort_field: Option<String>,

    #[serde(rename = "sortOrder")]
    pub sort_order: Option<String>,
}

/// Publicly browsable, sorted bid listing for a bidder.
///
/// The caller-supplied field and direction pass through the allow-list in
/// the store layer; the raw strings never reach the query.
pub async fn sorted_bids(
    State(state): State<AppState>,
    Path(email): Path<String>,
    Query(query): Query<SortQuery>,
) -> ApiResult<Json<Vec<Bid>>> {
    let sort = SortSpec::from_params(query.sort_field.as_deref(), query.sort_order.as_deref());
    Ok(Json(repo(&state).placed_by_sorted(&email, &sort).await?))
}

/// Move a bid's status. Only the job owner (buyer) may do this; the
/// owner descriptor arrives in the query string.
pub async fn update_bid_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<OwnerQuery>,
    user: AuthUser,
    Json(update): Json<BidStatusUpdate>,
) -> ApiResult<Json<UpdateResult>> {
    ensure_owner(&user, query.owner())?;
    let id = ObjectId::parse(&id).map_err(|_| ApiError::bad_request("Invalid bid id"))?;
    Ok(Json(repo(&state).set_status(&id, &update).await?))
}

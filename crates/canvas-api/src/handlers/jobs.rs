//! Job API handlers.

use axum::extract::{Path, Query, State};
use axum::Json;

use canvas_models::{Job, JobUpdate, ObjectId};
use canvas_store::{DeleteResult, InsertOneResult, JobRepository, UpdateResult};

use crate::auth::{ensure_owner, AuthUser};
use crate::error::{ApiError, ApiResult};
use crate::handlers::OwnerQuery;
use crate::state::AppState;

fn repo(state: &AppState) -> JobRepository {
    JobRepository::new((*state.store).clone())
}

fn parse_id(id: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse(id).map_err(|_| ApiError::bad_request("Invalid job id"))
}

/// List jobs posted by an owner. The path email is the owner descriptor.
pub async fn posted_jobs(
    State(state): State<AppState>,
    Path(email): Path<String>,
    user: AuthUser,
) -> ApiResult<Json<Vec<Job>>> {
    ensure_owner(&user, &email)?;
    Ok(Json(repo(&state).posted_by(&email).await?))
}

/// Public browse by category; exact match on the category field.
pub async fn jobs_by_category(
    State(state): State<AppState>,
    Path(categories): Path<String>,
) -> ApiResult<Json<Vec<Job>>> {
    Ok(Json(repo(&state).in_category(&categories).await?))
}

/// Look up a single job by id. A miss serializes as `null`.
pub async fn find_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<OwnerQuery>,
    user: AuthUser,
) -> ApiResult<Json<Option<Job>>> {
    ensure_owner(&user, query.owner())?;
    let id = parse_id(&id)?;
    Ok(Json(repo(&state).find_by_id(&id).await?))
}

/// Create a job posting.
pub async fn create_job(
    State(state): State<AppState>,
    Query(query): Query<OwnerQuery>,
    user: AuthUser,
    Json(job): Json<Job>,
) -> ApiResult<Json<InsertOneResult>> {
    ensure_owner(&user, query.owner())?;
    Ok(Json(repo(&state).insert(&job).await?))
}

/// Delete a job posting. Deleting an already-deleted id reports
/// zero matched rather than erroring.
pub async fn delete_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<OwnerQuery>,
    user: AuthUser,
) -> ApiResult<Json<DeleteResult>> {
    ensure_owner(&user, query.owner())?;
    let id = parse_id(&id)?;
    Ok(Json(repo(&state).delete(&id).await?))
}

/// Update a job posting with the whitelisted field set.
///
/// Upsert is on: an unknown id creates a new document whose id is
/// store-generated, not the path id.
pub async fn update_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<OwnerQuery>,
    user: AuthUser,
    Json(update): Json<JobUpdate>,
) -> ApiResult<Json<UpdateResult>> {
    ensure_owner(&user, query.owner())?;
    let id = parse_id(&id)?;
    Ok(Json(repo(&state).update(&id, &update).await?))
}

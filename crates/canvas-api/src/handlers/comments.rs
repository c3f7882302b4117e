//! Comment API handlers.

use axum::extract::State;
use axum::Json;

use canvas_models::Comment;
use canvas_store::{CommentRepository, InsertOneResult};

use crate::error::ApiResult;
use crate::state::AppState;

/// Append a comment. Unmoderated and unauthenticated.
pub async fn create_comment(
    State(state): State<AppState>,
    Json(comment): Json<Comment>,
) -> ApiResult<Json<InsertOneResult>> {
    let repo = CommentRepository::new((*state.store).clone());
    Ok(Json(repo.insert(&comment).await?))
}

//! Session handlers: token issuance and logout.

use std::collections::HashMap;

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::auth::{clear_session_cookie, session_cookie, Claims};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Identity payload accepted by `POST /jwt`.
///
/// There is no password exchange: whatever identity the caller presents
/// is signed as-is. Only the email's presence is checked.
#[derive(Debug, Deserialize)]
pub struct IdentityPayload {
    pub email: String,

    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

#[derive(Serialize)]
pub struct SessionResponse {
    pub success: bool,
}

/// Issue a session token and set it as an HTTP-only cookie.
pub async fn issue_token(
    State(state): State<AppState>,
    Json(identity): Json<IdentityPayload>,
) -> ApiResult<impl IntoResponse> {
    let claims = Claims::new(&identity.email, identity.extra, state.tokens.ttl_secs());
    let token = state
        .tokens
        .issue(&claims)
        .map_err(|e| ApiError::internal(format!("Token signing failed: {}", e)))?;

    info!(email = %identity.email, "Issued session token");

    Ok((
        [(header::SET_COOKIE, session_cookie(&token, &state.config))],
        Json(SessionResponse { success: true }),
    ))
}

/// Clear the session cookie.
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::SET_COOKIE, clear_session_cookie(&state.config))],
        Json(SessionResponse { success: true }),
    )
}

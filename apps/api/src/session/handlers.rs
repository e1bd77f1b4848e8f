//! Axum route handlers for the session API.

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::session::{
    demo_profile, NewProfile, ProfileUpdate, SessionId, SessionInfo, UserProfile, DEMO_PROGRESS,
};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DemoLoginRequest {
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct ProgressUpdate {
    pub topic: String,
    pub progress: u32,
}

/// POST /api/v1/session
///
/// Registers a learner and opens a session for them.
pub async fn handle_register(
    State(state): State<AppState>,
    Json(request): Json<NewProfile>,
) -> Result<Json<SessionInfo>, AppError> {
    Ok(Json(state.sessions.start(request)?))
}

/// POST /api/v1/session/demo
///
/// Signs in as the demo learner, progress pre-filled.
pub async fn handle_demo_login(
    State(state): State<AppState>,
    Json(request): Json<DemoLoginRequest>,
) -> Result<Json<SessionInfo>, AppError> {
    let mut info = state.sessions.start(demo_profile(&request.email))?;
    for (topic, progress) in DEMO_PROGRESS {
        info.user = state
            .sessions
            .update_progress(info.session_id, topic, progress)?;
    }
    Ok(Json(info))
}

/// GET /api/v1/session
pub async fn handle_get_session(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
) -> Result<Json<SessionInfo>, AppError> {
    Ok(Json(state.sessions.get(session_id)?))
}

/// PUT /api/v1/session
///
/// Settings page edits.
pub async fn handle_update_profile(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<UserProfile>, AppError> {
    Ok(Json(state.sessions.update_profile(session_id, update)?))
}

/// PATCH /api/v1/session/progress
pub async fn handle_update_progress(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
    Json(update): Json<ProgressUpdate>,
) -> Result<Json<UserProfile>, AppError> {
    if update.topic.trim().is_empty() {
        return Err(AppError::Validation("topic cannot be empty".to_string()));
    }

    let user = state
        .sessions
        .update_progress(session_id, update.topic.trim(), update.progress)?;
    Ok(Json(user))
}

/// DELETE /api/v1/session
///
/// Logs out. In-flight AI requests made under this session are cancelled.
pub async fn handle_logout(
    State(state): State<AppState>,
    SessionId(session_id): SessionId,
) -> Result<StatusCode, AppError> {
    state.sessions.end(session_id)?;
    Ok(StatusCode::NO_CONTENT)
}

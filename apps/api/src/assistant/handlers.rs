//! Axum route handlers for the AI facades.
//!
//! Every handler answers 200 with an `AiOutcome`; upstream failures show up as
//! `"status": "fallback"`, never as an HTTP error.

use axum::{extract::State, Json};
use tokio_util::sync::{CancellationToken, DropGuard};

use crate::assistant::assessment::{Assessment, AssessmentRequest};
use crate::assistant::content::{AdaptContentRequest, AdaptedContent};
use crate::assistant::feedback::FeedbackRequest;
use crate::assistant::path::{LearningPath, LearningPathRequest, StudyPlan, StudyPlanRequest};
use crate::assistant::progress::{
    LearningProgressAnalysis, LearningProgressRequest, ProgressAnalysis, ProgressMetrics,
};
use crate::assistant::recommendations::{CourseRecommendations, RecommendationRequest};
use crate::assistant::schedule::{OptimizedSchedule, SchedulePatterns};
use crate::assistant::tutoring::{StudyAssistance, StudyAssistanceRequest};
use crate::assistant::AiOutcome;
use crate::errors::AppError;
use crate::session::SessionId;
use crate::state::AppState;

/// Cancellation scope for one HTTP request.
///
/// Fires when the caller's session ends or when the handler future is
/// dropped (client disconnected), whichever comes first.
pub struct RequestCancellation {
    token: CancellationToken,
    _guard: DropGuard,
}

impl RequestCancellation {
    pub fn new(state: &AppState, session: Option<SessionId>) -> Result<Self, AppError> {
        let token = match session {
            Some(SessionId(id)) => state.sessions.cancellation(id)?.child_token(),
            None => CancellationToken::new(),
        };
        let guard = token.clone().drop_guard();
        Ok(Self {
            token,
            _guard: guard,
        })
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }
}

/// POST /api/v1/ai/learning-path
pub async fn handle_learning_path(
    State(state): State<AppState>,
    session: Option<SessionId>,
    Json(request): Json<LearningPathRequest>,
) -> Result<Json<AiOutcome<LearningPath>>, AppError> {
    let scope = RequestCancellation::new(&state, session)?;
    let outcome = state
        .assistant
        .generate_personalized_path(&request, scope.token())
        .await;
    Ok(Json(outcome))
}

/// POST /api/v1/ai/assessment
pub async fn handle_assessment(
    State(state): State<AppState>,
    session: Option<SessionId>,
    Json(request): Json<AssessmentRequest>,
) -> Result<Json<AiOutcome<Assessment>>, AppError> {
    let scope = RequestCancellation::new(&state, session)?;
    let outcome = state
        .assistant
        .generate_assessment(&request, scope.token())
        .await;
    Ok(Json(outcome))
}

/// POST /api/v1/ai/study-plan
pub async fn handle_study_plan(
    State(state): State<AppState>,
    session: Option<SessionId>,
    Json(request): Json<StudyPlanRequest>,
) -> Result<Json<AiOutcome<StudyPlan>>, AppError> {
    let scope = RequestCancellation::new(&state, session)?;
    let outcome = state
        .assistant
        .generate_study_plan(&request, scope.token())
        .await;
    Ok(Json(outcome))
}

/// POST /api/v1/ai/assistance
pub async fn handle_assistance(
    State(state): State<AppState>,
    session: Option<SessionId>,
    Json(request): Json<StudyAssistanceRequest>,
) -> Result<Json<AiOutcome<StudyAssistance>>, AppError> {
    if request.query.trim().is_empty() {
        return Err(AppError::Validation("query cannot be empty".to_string()));
    }

    let scope = RequestCancellation::new(&state, session)?;
    let outcome = state
        .assistant
        .get_study_assistance(&request, scope.token())
        .await;
    Ok(Json(outcome))
}

/// POST /api/v1/ai/progress
pub async fn handle_progress(
    State(state): State<AppState>,
    session: Option<SessionId>,
    Json(metrics): Json<ProgressMetrics>,
) -> Result<Json<AiOutcome<ProgressAnalysis>>, AppError> {
    let scope = RequestCancellation::new(&state, session)?;
    let outcome = state.assistant.analyze_progress(&metrics, scope.token()).await;
    Ok(Json(outcome))
}

/// POST /api/v1/ai/schedule
pub async fn handle_schedule(
    State(state): State<AppState>,
    session: Option<SessionId>,
    Json(patterns): Json<SchedulePatterns>,
) -> Result<Json<AiOutcome<OptimizedSchedule>>, AppError> {
    let scope = RequestCancellation::new(&state, session)?;
    let outcome = state
        .assistant
        .optimize_schedule(&patterns, scope.token())
        .await;
    Ok(Json(outcome))
}

/// POST /api/v1/ai/adapt
pub async fn handle_adapt(
    State(state): State<AppState>,
    session: Option<SessionId>,
    Json(request): Json<AdaptContentRequest>,
) -> Result<Json<AiOutcome<AdaptedContent>>, AppError> {
    if request.content.trim().is_empty() {
        return Err(AppError::Validation("content cannot be empty".to_string()));
    }

    let scope = RequestCancellation::new(&state, session)?;
    let outcome = state.assistant.adapt_content(&request, scope.token()).await;
    Ok(Json(outcome))
}

/// POST /api/v1/ai/recommendations
pub async fn handle_recommendations(
    State(state): State<AppState>,
    session: Option<SessionId>,
    Json(request): Json<RecommendationRequest>,
) -> Result<Json<AiOutcome<CourseRecommendations>>, AppError> {
    let scope = RequestCancellation::new(&state, session)?;
    let outcome = state
        .assistant
        .generate_recommendations(&request, scope.token())
        .await;
    Ok(Json(outcome))
}

/// POST /api/v1/ai/learning-analysis
pub async fn handle_learning_analysis(
    State(state): State<AppState>,
    session: Option<SessionId>,
    Json(request): Json<LearningProgressRequest>,
) -> Result<Json<AiOutcome<LearningProgressAnalysis>>, AppError> {
    let scope = RequestCancellation::new(&state, session)?;
    let outcome = state
        .assistant
        .analyze_learning_progress(&request, scope.token())
        .await;
    Ok(Json(outcome))
}

/// POST /api/v1/ai/feedback
pub async fn handle_feedback(
    State(state): State<AppState>,
    session: Option<SessionId>,
    Json(request): Json<FeedbackRequest>,
) -> Result<Json<AiOutcome<String>>, AppError> {
    if request.response.trim().is_empty() {
        return Err(AppError::Validation("response cannot be empty".to_string()));
    }

    let scope = RequestCancellation::new(&state, session)?;
    let outcome = state
        .assistant
        .get_personalized_feedback(&request, scope.token())
        .await;
    Ok(Json(outcome))
}

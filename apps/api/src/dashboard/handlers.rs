//! Axum route handlers for the dashboard pages.

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::{debug, info};

use crate::assistant::handlers::RequestCancellation;
use crate::assistant::schedule::OptimizedSchedule;
use crate::assistant::{AiOutcome, FallbackReason};
use crate::courses::catalog::enrolled_course;
use crate::dashboard::{
    course_assessment_request, course_schedule_patterns, learning_path_request, progress_metrics,
    recommendation_request, study_plan_request, weekly_schedule_patterns, CourseFocus, Insights,
    Overview, ProfileRefresh,
};
use crate::errors::AppError;
use crate::session::{ProfileUpdate, SessionId};
use crate::state::AppState;

/// Logs each section that fell back; returns how many did.
fn count_fallbacks(page: &str, sections: &[(&str, Option<&FallbackReason>)]) -> usize {
    sections
        .iter()
        .filter_map(|(section, reason)| reason.map(|r| (*section, r)))
        .inspect(|(section, reason)| debug!(page, section = *section, "Section fell back: {reason}"))
        .count()
}

/// GET /api/v1/dashboard/overview
///
/// Learning path, course recommendations, and progress insights for the
/// signed-in learner.
pub async fn handle_overview(
    State(state): State<AppState>,
    session: SessionId,
) -> Result<Json<Overview>, AppError> {
    let user = state.sessions.get(session.0)?.user;
    let scope = RequestCancellation::new(&state, Some(session))?;
    let cancel = scope.token();

    let path_request = learning_path_request(&user);
    let recommendation_request = recommendation_request(&user);
    let metrics = progress_metrics(&user);

    let (learning_path, recommendations, analysis) = tokio::join!(
        state.assistant.generate_personalized_path(&path_request, cancel),
        state.assistant.generate_recommendations(&recommendation_request, cancel),
        state.assistant.analyze_progress(&metrics, cancel),
    );

    let fallbacks = count_fallbacks(
        "overview",
        &[
            ("learningPath", learning_path.reason()),
            ("recommendations", recommendations.reason()),
            ("insights", analysis.reason()),
        ],
    );
    info!(user_id = %user.id, fallbacks, "Dashboard overview assembled");

    Ok(Json(Overview {
        learning_path,
        recommendations,
        insights: analysis.map(Insights::from),
    }))
}

/// PUT /api/v1/dashboard/profile
///
/// Saves profile edits, then regenerates the learning path and the study
/// plan from the saved profile.
pub async fn handle_save_profile(
    State(state): State<AppState>,
    session: SessionId,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<ProfileRefresh>, AppError> {
    let user = state.sessions.update_profile(session.0, update)?;
    let scope = RequestCancellation::new(&state, Some(session))?;
    let cancel = scope.token();

    let path_request = learning_path_request(&user);
    let plan_request = study_plan_request(&user);

    let (learning_path, study_plan) = tokio::join!(
        state.assistant.generate_personalized_path(&path_request, cancel),
        state.assistant.generate_study_plan(&plan_request, cancel),
    );

    let fallbacks = count_fallbacks(
        "profile",
        &[
            ("learningPath", learning_path.reason()),
            ("studyPlan", study_plan.reason()),
        ],
    );
    info!(user_id = %user.id, fallbacks, "Profile saved and plans regenerated");

    Ok(Json(ProfileRefresh {
        user,
        learning_path,
        study_plan,
    }))
}

/// GET /api/v1/dashboard/schedule
///
/// Weekly study schedule built from the learner's goals.
pub async fn handle_schedule(
    State(state): State<AppState>,
    session: SessionId,
) -> Result<Json<AiOutcome<OptimizedSchedule>>, AppError> {
    let user = state.sessions.get(session.0)?.user;
    let scope = RequestCancellation::new(&state, Some(session))?;

    let patterns = weekly_schedule_patterns(&user);
    let schedule = state
        .assistant
        .optimize_schedule(&patterns, scope.token())
        .await;

    count_fallbacks("schedule", &[("schedule", schedule.reason())]);
    Ok(Json(schedule))
}

/// GET /api/v1/dashboard/courses/:id
///
/// Practice questions and a study schedule for one enrolled course.
pub async fn handle_course_focus(
    State(state): State<AppState>,
    session: SessionId,
    Path(course_id): Path<u32>,
) -> Result<Json<CourseFocus>, AppError> {
    let user = state.sessions.get(session.0)?.user;
    let course = enrolled_course(course_id)
        .ok_or_else(|| AppError::NotFound(format!("Course {course_id} not found")))?;

    let scope = RequestCancellation::new(&state, Some(session))?;
    let cancel = scope.token();

    let assessment_request = course_assessment_request(&user, &course);
    let patterns = course_schedule_patterns(&user, &course);

    let (assessment, schedule) = tokio::join!(
        state.assistant.generate_assessment(&assessment_request, cancel),
        state.assistant.optimize_schedule(&patterns, cancel),
    );

    count_fallbacks(
        "course",
        &[
            ("assessment", assessment.reason()),
            ("schedule", schedule.reason()),
        ],
    );

    Ok(Json(CourseFocus {
        course,
        assessment,
        schedule,
    }))
}

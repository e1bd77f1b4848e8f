// Dashboard: composes several AI facades from the signed-in learner's profile.
// Facade calls for one page run concurrently; each lands or falls back on its own.

pub mod handlers;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::assistant::assessment::{Assessment, AssessmentRequest};
use crate::assistant::path::{LearningPath, LearningPathRequest, StudyPlan, StudyPlanRequest};
use crate::assistant::progress::{ProgressAnalysis, ProgressMetrics};
use crate::assistant::recommendations::{
    CourseRecommendations, LearningHistory, RecommendationProfile, RecommendationRequest,
};
use crate::assistant::schedule::{OptimizedSchedule, SchedulePatterns};
use crate::assistant::AiOutcome;
use crate::courses::catalog::EnrolledCourse;
use crate::session::UserProfile;

/// Baseline velocity reported for learners with no timing data yet.
const DEFAULT_VELOCITY: f64 = 1.0;

/// Weekly study hours assumed when a saved profile regenerates its plan.
const PLANNED_HOURS_PER_WEEK: f64 = 10.0;

const DEFAULT_PEAK_TIMES: [&str; 2] = ["morning", "evening"];
const DEFAULT_WEEKDAY_HOURS: [&str; 2] = ["09:00-12:00", "15:00-18:00"];
const DEFAULT_WEEKEND_HOURS: [&str; 1] = ["10:00-15:00"];
const COURSE_DIFFICULTY: &str = "intermediate";
/// Topic difficulty used by the weekly schedule page.
const WEEKLY_TOPIC_DIFFICULTY: [(&str, &str); 2] = [("React", "intermediate"), ("Python", "beginner")];

/// Slice of a progress analysis shown on the overview.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Insights {
    pub patterns: Vec<String>,
    pub suggestions: Vec<String>,
}

impl From<ProgressAnalysis> for Insights {
    fn from(analysis: ProgressAnalysis) -> Self {
        Self {
            patterns: analysis.patterns,
            suggestions: analysis.suggestions,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub learning_path: AiOutcome<LearningPath>,
    pub recommendations: AiOutcome<CourseRecommendations>,
    pub insights: AiOutcome<Insights>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseFocus {
    pub course: EnrolledCourse,
    pub assessment: AiOutcome<Assessment>,
    pub schedule: AiOutcome<OptimizedSchedule>,
}

/// A saved profile with the plans regenerated from it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRefresh {
    pub user: UserProfile,
    pub learning_path: AiOutcome<LearningPath>,
    pub study_plan: AiOutcome<StudyPlan>,
}

fn owned(slots: &[&str]) -> Vec<String> {
    slots.iter().map(|s| s.to_string()).collect()
}

fn progress_scores(user: &UserProfile) -> BTreeMap<String, f64> {
    user.progress
        .iter()
        .map(|(topic, pct)| (topic.clone(), f64::from(*pct)))
        .collect()
}

pub fn learning_path_request(user: &UserProfile) -> LearningPathRequest {
    LearningPathRequest::new(user.interests.clone(), user.goals.clone(), &user.level)
}

pub fn study_plan_request(user: &UserProfile) -> StudyPlanRequest {
    StudyPlanRequest {
        topics: user.interests.clone(),
        time_available: PLANNED_HOURS_PER_WEEK,
        ..StudyPlanRequest::default()
    }
}

pub fn recommendation_request(user: &UserProfile) -> RecommendationRequest {
    RecommendationRequest {
        profile: RecommendationProfile {
            interests: user.interests.clone(),
            level: user.level.clone(),
            goals: user.goals.clone(),
            ..RecommendationProfile::default()
        },
        history: LearningHistory {
            assessment_scores: progress_scores(user),
            ..LearningHistory::default()
        },
    }
}

pub fn progress_metrics(user: &UserProfile) -> ProgressMetrics {
    let scores = progress_scores(user);
    ProgressMetrics {
        velocity: DEFAULT_VELOCITY,
        completion_rates: scores.clone(),
        scores,
        ..ProgressMetrics::default()
    }
}

/// Scores come from the learner's whole progress map, not just this course.
pub fn course_assessment_request(user: &UserProfile, course: &EnrolledCourse) -> AssessmentRequest {
    AssessmentRequest {
        current_topic: course.title.clone(),
        scores: progress_scores(user),
        level: user.level.clone(),
        ..AssessmentRequest::default()
    }
}

/// Weekday mornings and afternoons, weekend daytime.
fn study_patterns(user: &UserProfile, topic_difficulty: BTreeMap<String, String>) -> SchedulePatterns {
    SchedulePatterns {
        peak_times: owned(&DEFAULT_PEAK_TIMES),
        availability: BTreeMap::from([
            ("weekday".to_string(), owned(&DEFAULT_WEEKDAY_HOURS)),
            ("weekend".to_string(), owned(&DEFAULT_WEEKEND_HOURS)),
        ]),
        topic_difficulty,
        goals: user.goals.clone(),
        ..SchedulePatterns::default()
    }
}

pub fn course_schedule_patterns(user: &UserProfile, course: &EnrolledCourse) -> SchedulePatterns {
    let difficulty = BTreeMap::from([(course.title.clone(), COURSE_DIFFICULTY.to_string())]);
    study_patterns(user, difficulty)
}

pub fn weekly_schedule_patterns(user: &UserProfile) -> SchedulePatterns {
    let difficulty = WEEKLY_TOPIC_DIFFICULTY
        .iter()
        .map(|(topic, level)| (topic.to_string(), level.to_string()))
        .collect();
    study_patterns(user, difficulty)
}

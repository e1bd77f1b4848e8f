//! Course recommendations from a learner profile and history.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::assistant::prompts::recommendations_prompt;
use crate::assistant::{AiOutcome, Operation, StudyAssistant};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StudyPreferences {
    pub content_format: Vec<String>,
    pub study_time: Vec<String>,
    pub difficulty: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecommendationProfile {
    pub interests: Vec<String>,
    pub level: String,
    pub goals: Vec<String>,
    pub completed_courses: Vec<String>,
    pub learning_style: String,
    pub time_commitment: String,
    pub performance: BTreeMap<String, f64>,
    pub preferences: StudyPreferences,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngagementMetrics {
    pub average_session_duration: f64,
    pub completion_rate: f64,
    pub interaction_frequency: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LearningHistory {
    pub completed_topics: Vec<String>,
    pub assessment_scores: BTreeMap<String, f64>,
    pub time_spent: BTreeMap<String, f64>,
    pub challenging_concepts: Vec<String>,
    pub completion_rates: BTreeMap<String, f64>,
    pub engagement_metrics: EngagementMetrics,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecommendationRequest {
    pub profile: RecommendationProfile,
    pub history: LearningHistory,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRecommendation {
    pub id: String,
    pub title: String,
    pub description: String,
    pub level: String,
    /// Nominally 0.0 – 1.0; trusted as returned.
    pub match_score: f64,
    pub topics: Vec<String>,
    pub format: String,
    pub duration: String,
    pub prerequisites: Vec<String>,
    pub learning_outcomes: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedSequence {
    pub sequence: Vec<String>,
    pub milestones: Vec<String>,
    pub timeline: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRecommendations {
    pub recommendations: Vec<CourseRecommendation>,
    pub learning_path: RecommendedSequence,
    pub skill_gaps: Vec<String>,
    /// Course title → prerequisites.
    pub prerequisites: BTreeMap<String, Vec<String>>,
}

impl StudyAssistant {
    pub async fn generate_recommendations(
        &self,
        request: &RecommendationRequest,
        cancel: &CancellationToken,
    ) -> AiOutcome<CourseRecommendations> {
        self.request_json(
            Operation::Recommendations,
            recommendations_prompt(request),
            cancel,
        )
        .await
    }
}

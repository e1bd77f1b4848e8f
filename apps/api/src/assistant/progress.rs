//! Progress monitoring: metric-level analysis and response-level learning analysis.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::assistant::prompts::{learning_analysis_prompt, progress_analysis_prompt};
use crate::assistant::{AiOutcome, Operation, StudyAssistant};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LearningPatterns {
    pub preferred_times: Vec<String>,
    /// Minutes.
    pub session_duration: f64,
    pub topic_progression: Vec<String>,
    pub challenge_areas: Vec<String>,
}

/// Raw engagement metrics for one learner. Every map is keyed by topic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgressMetrics {
    pub velocity: f64,
    pub completion_rates: BTreeMap<String, f64>,
    pub scores: BTreeMap<String, f64>,
    pub time_spent: BTreeMap<String, f64>,
    pub engagement: BTreeMap<String, f64>,
    pub learning_patterns: LearningPatterns,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecommendations {
    pub pace_adjustment: String,
    pub methodology_changes: Vec<String>,
    pub resource_suggestions: Vec<String>,
    pub intervention_strategies: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressReport {
    /// Nominally 0 – 100; not range-checked.
    pub overall_progress: f64,
    pub strength_areas: Vec<String>,
    pub improvement_areas: Vec<String>,
    pub next_milestones: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressAnalysis {
    pub insights: Vec<String>,
    pub patterns: Vec<String>,
    pub suggestions: Vec<String>,
    pub predictions: Vec<String>,
    pub adaptive_recommendations: ProgressRecommendations,
    pub progress_report: ProgressReport,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PastAssessment {
    pub topic: String,
    pub score: f64,
    pub date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LearningContext {
    pub previous_assessments: Vec<PastAssessment>,
    pub learning_style: String,
    pub goals: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LearningProgressRequest {
    pub responses: Vec<String>,
    pub topic: String,
    pub context: LearningContext,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningSnapshot {
    pub level: String,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub next_topics: Vec<String>,
}

// An analysis with nothing to go on places the learner at the entry level.
impl Default for LearningSnapshot {
    fn default() -> Self {
        Self {
            level: "beginner".to_string(),
            strengths: Vec::new(),
            improvements: Vec::new(),
            next_topics: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressTrends {
    pub improvement: Vec<String>,
    pub challenges: Vec<String>,
    pub velocity: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextStepRecommendations {
    pub next_steps: Vec<String>,
    pub resources: Vec<String>,
    pub practice_areas: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdaptiveContentHint {
    pub format: String,
    pub difficulty: String,
    pub focus: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningProgressAnalysis {
    pub current_analysis: LearningSnapshot,
    pub progress_trends: ProgressTrends,
    pub recommendations: NextStepRecommendations,
    pub adaptive_content: AdaptiveContentHint,
}

impl StudyAssistant {
    pub async fn analyze_progress(
        &self,
        metrics: &ProgressMetrics,
        cancel: &CancellationToken,
    ) -> AiOutcome<ProgressAnalysis> {
        self.request_json(
            Operation::ProgressAnalysis,
            progress_analysis_prompt(metrics),
            cancel,
        )
        .await
    }

    pub async fn analyze_learning_progress(
        &self,
        request: &LearningProgressRequest,
        cancel: &CancellationToken,
    ) -> AiOutcome<LearningProgressAnalysis> {
        self.request_json(
            Operation::LearningProgressAnalysis,
            learning_analysis_prompt(request),
            cancel,
        )
        .await
    }
}

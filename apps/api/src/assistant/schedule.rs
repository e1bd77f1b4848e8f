//! Schedule optimization.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::assistant::prompts::schedule_prompt;
use crate::assistant::{AiOutcome, Operation, StudyAssistant};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionPreferences {
    /// Minutes per study session.
    pub session_duration: f64,
    /// Sessions between breaks.
    pub break_frequency: f64,
    pub review_frequency: String,
}

/// When and how a learner studies. `availability` maps a day class
/// ("weekday", "weekend") to time windows such as "09:00-12:00".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SchedulePatterns {
    pub peak_times: Vec<String>,
    pub availability: BTreeMap<String, Vec<String>>,
    pub topic_difficulty: BTreeMap<String, String>,
    pub goals: Vec<String>,
    pub learning_style: String,
    pub energy_levels: BTreeMap<String, String>,
    pub preferences: SessionPreferences,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyBlock {
    pub time: String,
    pub topic: String,
    pub duration: String,
    #[serde(rename = "type")]
    pub block_type: String,
    pub format: String,
    pub intensity: String,
    pub objectives: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakBlock {
    pub time: String,
    pub duration: String,
    #[serde(rename = "type")]
    pub break_type: String,
    pub recommendation: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewBlock {
    pub time: String,
    pub topics: Vec<String>,
    pub duration: String,
    pub format: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRecommendations {
    pub pace_adjustments: Vec<String>,
    pub focus_areas: Vec<String>,
    pub methodology_changes: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizedSchedule {
    pub schedule: Vec<StudyBlock>,
    pub breaks: Vec<BreakBlock>,
    pub reviews: Vec<ReviewBlock>,
    pub adaptive_recommendations: ScheduleRecommendations,
}

impl StudyAssistant {
    pub async fn optimize_schedule(
        &self,
        patterns: &SchedulePatterns,
        cancel: &CancellationToken,
    ) -> AiOutcome<OptimizedSchedule> {
        self.request_json(
            Operation::ScheduleOptimization,
            schedule_prompt(patterns),
            cancel,
        )
        .await
    }
}

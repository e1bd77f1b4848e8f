//! Adaptive assessment generation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::assistant::prompts::assessment_prompt;
use crate::assistant::{AiOutcome, Operation, StudyAssistant};

/// Where the learner currently stands on a topic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssessmentRequest {
    pub current_topic: String,
    pub scores: BTreeMap<String, f64>,
    pub gaps: Vec<String>,
    pub level: String,
    pub recent_mistakes: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub explanation: String,
    pub difficulty: String,
    pub concept_tested: String,
    pub hints: Vec<String>,
    pub follow_up_questions: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentRecommendations {
    pub focus_areas: Vec<String>,
    pub remedial_content: Vec<String>,
    pub practice_exercises: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub questions: Vec<AssessmentQuestion>,
    pub adaptive_recommendations: AssessmentRecommendations,
}

impl StudyAssistant {
    pub async fn generate_assessment(
        &self,
        request: &AssessmentRequest,
        cancel: &CancellationToken,
    ) -> AiOutcome<Assessment> {
        self.request_json(Operation::Assessment, assessment_prompt(request), cancel)
            .await
    }
}

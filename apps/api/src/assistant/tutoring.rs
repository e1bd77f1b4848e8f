//! Tutoring: answers a learner's question in context.

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::assistant::prompts::study_assistance_prompt;
use crate::assistant::{AiOutcome, Operation, StudyAssistant};

/// How well the learner understood an earlier answer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Understanding {
    Good,
    #[default]
    Partial,
    Poor,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PreviousResponse {
    pub question: String,
    pub response: String,
    pub understanding: Understanding,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TutoringContext {
    pub topic: String,
    pub history: Vec<String>,
    pub level: String,
    pub learning_style: String,
    pub previous_responses: Vec<PreviousResponse>,
}

impl Default for TutoringContext {
    fn default() -> Self {
        Self {
            topic: String::new(),
            history: Vec::new(),
            level: "beginner".to_string(),
            learning_style: String::new(),
            previous_responses: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StudyAssistanceRequest {
    pub query: String,
    pub context: TutoringContext,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdaptiveFeedback {
    pub concept_mastery: String,
    pub suggested_approach: String,
    pub common_misconceptions: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyAssistance {
    pub explanation: String,
    pub examples: Vec<String>,
    pub steps: Vec<String>,
    pub related_concepts: Vec<String>,
    pub practice_questions: Vec<String>,
    pub visual_aids: Vec<String>,
    pub interactive_elements: Vec<String>,
    pub further_resources: Vec<String>,
    pub adaptive_feedback: AdaptiveFeedback,
}

impl StudyAssistant {
    pub async fn get_study_assistance(
        &self,
        request: &StudyAssistanceRequest,
        cancel: &CancellationToken,
    ) -> AiOutcome<StudyAssistance> {
        self.request_json(
            Operation::StudyAssistance,
            study_assistance_prompt(request),
            cancel,
        )
        .await
    }
}

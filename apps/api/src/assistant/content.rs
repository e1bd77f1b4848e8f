//! Content personalization.

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::assistant::prompts::adapt_content_prompt;
use crate::assistant::{AiOutcome, Operation, StudyAssistant};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentPreferences {
    pub content_format: Vec<String>,
    pub complexity: String,
    pub interactivity_level: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LearnerPerformance {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub learning_velocity: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LearnerProfile {
    pub level: String,
    pub learning_style: String,
    pub background: Vec<String>,
    pub preferences: ContentPreferences,
    pub performance: LearnerPerformance,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdaptContentRequest {
    pub content: String,
    pub profile: LearnerProfile,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentAssessment {
    #[serde(rename = "type")]
    pub assessment_type: String,
    pub questions: Vec<String>,
    pub difficulty: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplementaryResource {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub url: String,
    pub description: String,
}

/// Model-rewritten content. The fallback is blank; callers that want to show
/// something anyway keep the source text they sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdaptedContent {
    pub adapted_content: String,
    pub examples: Vec<String>,
    pub exercises: Vec<String>,
    pub context: Vec<String>,
    pub visual_aids: Vec<String>,
    pub interactive_elements: Vec<String>,
    pub assessments: Vec<ContentAssessment>,
    pub supplementary_resources: Vec<SupplementaryResource>,
}

impl StudyAssistant {
    pub async fn adapt_content(
        &self,
        request: &AdaptContentRequest,
        cancel: &CancellationToken,
    ) -> AiOutcome<AdaptedContent> {
        self.request_json(
            Operation::ContentAdaptation,
            adapt_content_prompt(request),
            cancel,
        )
        .await
    }
}

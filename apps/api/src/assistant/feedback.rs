//! Free-text feedback on a single student answer.

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::assistant::prompts::feedback_prompt;
use crate::assistant::{AiOutcome, Operation, StudyAssistant};

pub const FEEDBACK_UNAVAILABLE: &str = "Unable to generate feedback at this time.";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeedbackRequest {
    pub response: String,
    pub topic: String,
}

impl StudyAssistant {
    /// Unlike the JSON facades, the completion is returned as prose.
    pub async fn get_personalized_feedback(
        &self,
        request: &FeedbackRequest,
        cancel: &CancellationToken,
    ) -> AiOutcome<String> {
        self.request_text(
            Operation::Feedback,
            feedback_prompt(request),
            cancel,
            FEEDBACK_UNAVAILABLE,
        )
        .await
    }
}

// Study assistant: every AI-backed capability of LearnHub.
// Each facade renders a prompt, makes one completion call, and decodes the reply.
// All completions go through llm_client; no facade talks HTTP itself.

pub mod assessment;
pub mod content;
pub mod feedback;
pub mod handlers;
pub mod path;
pub mod progress;
pub mod prompts;
pub mod recommendations;
pub mod schedule;
pub mod tutoring;

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::llm_client::{strip_json_fences, CompletionBackend, LlmError};

/// Identifies a facade in logs and fallback reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    LearningPath,
    Assessment,
    StudyPlan,
    StudyAssistance,
    ProgressAnalysis,
    ScheduleOptimization,
    ContentAdaptation,
    Recommendations,
    LearningProgressAnalysis,
    Feedback,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::LearningPath => "learning_path",
            Operation::Assessment => "assessment",
            Operation::StudyPlan => "study_plan",
            Operation::StudyAssistance => "study_assistance",
            Operation::ProgressAnalysis => "progress_analysis",
            Operation::ScheduleOptimization => "schedule_optimization",
            Operation::ContentAdaptation => "content_adaptation",
            Operation::Recommendations => "recommendations",
            Operation::LearningProgressAnalysis => "learning_progress_analysis",
            Operation::Feedback => "feedback",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a facade substituted its empty value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum FallbackReason {
    /// Transport, auth, rate-limit or model error from the completion endpoint.
    Unavailable(String),
    /// The completion was not JSON of the expected shape.
    Malformed(String),
    /// The model produced no usable text (empty or blocked).
    Empty(String),
    /// The caller's cancellation token fired first.
    Cancelled,
}

impl From<&LlmError> for FallbackReason {
    fn from(err: &LlmError) -> Self {
        match err {
            LlmError::Parse(e) => FallbackReason::Malformed(e.to_string()),
            LlmError::EmptyContent | LlmError::Blocked { .. } => {
                FallbackReason::Empty(err.to_string())
            }
            LlmError::Cancelled => FallbackReason::Cancelled,
            LlmError::Http(_) | LlmError::Api { .. } | LlmError::MissingApiKey => {
                FallbackReason::Unavailable(err.to_string())
            }
        }
    }
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FallbackReason::Unavailable(detail) => write!(f, "completion unavailable: {detail}"),
            FallbackReason::Malformed(detail) => write!(f, "malformed completion: {detail}"),
            FallbackReason::Empty(detail) => write!(f, "empty completion: {detail}"),
            FallbackReason::Cancelled => f.write_str("cancelled"),
        }
    }
}

/// Result of one facade call. Always carries a value.
///
/// `Generated` holds the decoded model output untouched; `Fallback` holds the
/// result type's static empty value plus the reason it was substituted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AiOutcome<T> {
    Generated { data: T },
    Fallback { data: T, reason: FallbackReason },
}

impl<T> AiOutcome<T> {
    #[cfg(test)]
    pub fn value(&self) -> &T {
        match self {
            AiOutcome::Generated { data } | AiOutcome::Fallback { data, .. } => data,
        }
    }

    /// Drops the success/fallback distinction.
    #[cfg(test)]
    pub fn into_value(self) -> T {
        match self {
            AiOutcome::Generated { data } | AiOutcome::Fallback { data, .. } => data,
        }
    }

    #[cfg(test)]
    pub fn is_fallback(&self) -> bool {
        matches!(self, AiOutcome::Fallback { .. })
    }

    pub fn reason(&self) -> Option<&FallbackReason> {
        match self {
            AiOutcome::Generated { .. } => None,
            AiOutcome::Fallback { reason, .. } => Some(reason),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> AiOutcome<U> {
        match self {
            AiOutcome::Generated { data } => AiOutcome::Generated { data: f(data) },
            AiOutcome::Fallback { data, reason } => AiOutcome::Fallback {
                data: f(data),
                reason,
            },
        }
    }
}

/// The facade layer. Cheap to clone; shares one completion backend.
#[derive(Clone)]
pub struct StudyAssistant {
    backend: Arc<dyn CompletionBackend>,
}

impl StudyAssistant {
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        Self { backend }
    }

    /// One completion round trip decoded as `T`, falling back to `T::default()`.
    async fn request_json<T>(
        &self,
        operation: Operation,
        prompt: String,
        cancel: &CancellationToken,
    ) -> AiOutcome<T>
    where
        T: DeserializeOwned + Default,
    {
        let result = match self.backend.complete(&prompt, cancel).await {
            Ok(text) => serde_json::from_str::<T>(strip_json_fences(&text)).map_err(LlmError::Parse),
            Err(e) => Err(e),
        };

        match result {
            Ok(data) => {
                debug!(operation = %operation, "AI request decoded");
                AiOutcome::Generated { data }
            }
            Err(e) => fallback(operation, &e, T::default()),
        }
    }

    /// One completion round trip kept as plain text.
    async fn request_text(
        &self,
        operation: Operation,
        prompt: String,
        cancel: &CancellationToken,
        default: &str,
    ) -> AiOutcome<String> {
        match self.backend.complete(&prompt, cancel).await {
            Ok(text) => AiOutcome::Generated {
                data: text.trim().to_string(),
            },
            Err(e) => fallback(operation, &e, default.to_string()),
        }
    }
}

fn fallback<T>(operation: Operation, err: &LlmError, data: T) -> AiOutcome<T> {
    let reason = FallbackReason::from(err);
    warn!(operation = %operation, "AI request fell back to empty result: {reason}");
    AiOutcome::Fallback { data, reason }
}

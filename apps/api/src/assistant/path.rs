//! Learning path and study plan generation.

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::assistant::prompts::{learning_path_prompt, study_plan_prompt};
use crate::assistant::{AiOutcome, Operation, StudyAssistant};

fn default_learning_style() -> String {
    "visual".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LearningPathRequest {
    pub interests: Vec<String>,
    pub goals: Vec<String>,
    pub current_level: String,
    pub learning_style: String,
    pub time_commitment: String,
}

impl Default for LearningPathRequest {
    fn default() -> Self {
        Self {
            interests: Vec::new(),
            goals: Vec::new(),
            current_level: String::new(),
            learning_style: default_learning_style(),
            time_commitment: "medium".to_string(),
        }
    }
}

impl LearningPathRequest {
    pub fn new(interests: Vec<String>, goals: Vec<String>, current_level: &str) -> Self {
        Self {
            interests,
            goals,
            current_level: current_level.to_string(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathTopic {
    pub name: String,
    pub duration: String,
    pub resources: Vec<String>,
    pub difficulty: String,
    pub format: String,
    pub prerequisites: Vec<String>,
    pub exercises: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathRecommendations {
    pub pace: String,
    pub focus_areas: Vec<String>,
    pub next_steps: Vec<String>,
}

/// A personalized learning path as returned by the model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningPath {
    pub topics: Vec<PathTopic>,
    pub milestones: Vec<String>,
    pub estimated_completion: String,
    pub adaptive_recommendations: PathRecommendations,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StudyPlanRequest {
    pub topics: Vec<String>,
    /// Hours available in total.
    pub time_available: f64,
    pub learning_style: String,
}

impl Default for StudyPlanRequest {
    fn default() -> Self {
        Self {
            topics: Vec::new(),
            time_available: 0.0,
            learning_style: default_learning_style(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanItem {
    pub topic: String,
    /// Hours.
    pub time_allocation: f64,
    pub resources: Vec<String>,
    pub activities: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyPlan {
    pub plan: Vec<PlanItem>,
    pub schedule: Vec<String>,
}

impl StudyAssistant {
    pub async fn generate_personalized_path(
        &self,
        request: &LearningPathRequest,
        cancel: &CancellationToken,
    ) -> AiOutcome<LearningPath> {
        self.request_json(Operation::LearningPath, learning_path_prompt(request), cancel)
            .await
    }

    pub async fn generate_study_plan(
        &self,
        request: &StudyPlanRequest,
        cancel: &CancellationToken,
    ) -> AiOutcome<StudyPlan> {
        self.request_json(Operation::StudyPlan, study_plan_prompt(request), cancel)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::testing::{api_down, assistant_with, StubBackend};
    use crate::assistant::FallbackReason;

    const PATH_REPLY: &str = r#"{"topics":[{"name":"HTML Basics","duration":"2h","resources":[],"difficulty":"beginner","format":"video","prerequisites":[],"exercises":[]}],"milestones":["Finish HTML"],"estimatedCompletion":"1 week","adaptiveRecommendations":{"pace":"steady","focusAreas":[],"nextSteps":[]}}"#;

    fn web_dev_request() -> LearningPathRequest {
        LearningPathRequest::new(
            vec!["Web Development".to_string()],
            vec!["Build 5 Projects".to_string()],
            "beginner",
        )
    }

    #[tokio::test]
    async fn test_path_decodes_reply_unmodified() {
        let backend = StubBackend::replying(PATH_REPLY);
        let outcome = assistant_with(backend.clone())
            .generate_personalized_path(&web_dev_request(), &CancellationToken::new())
            .await;

        let expected = LearningPath {
            topics: vec![PathTopic {
                name: "HTML Basics".into(),
                duration: "2h".into(),
                difficulty: "beginner".into(),
                format: "video".into(),
                ..PathTopic::default()
            }],
            milestones: vec!["Finish HTML".into()],
            estimated_completion: "1 week".into(),
            adaptive_recommendations: PathRecommendations {
                pace: "steady".into(),
                ..PathRecommendations::default()
            },
        };
        assert_eq!(outcome, AiOutcome::Generated { data: expected });

        // Round-trips to the exact JSON the model sent.
        let echoed = serde_json::to_value(outcome.value()).unwrap();
        let sent: serde_json::Value = serde_json::from_str(PATH_REPLY).unwrap();
        assert_eq!(echoed, sent);
        assert!(backend.last_prompt().contains("Interests: Web Development"));
    }

    #[tokio::test]
    async fn test_path_not_json_resolves_to_empty_path() {
        let outcome = assistant_with(StubBackend::replying("not json"))
            .generate_personalized_path(&web_dev_request(), &CancellationToken::new())
            .await;

        assert!(matches!(outcome.reason(), Some(FallbackReason::Malformed(_))));
        let empty = serde_json::to_value(outcome.into_value()).unwrap();
        assert_eq!(
            empty,
            serde_json::json!({
                "topics": [],
                "milestones": [],
                "estimatedCompletion": "",
                "adaptiveRecommendations": {"pace": "", "focusAreas": [], "nextSteps": []}
            })
        );
    }

    #[tokio::test]
    async fn test_path_missing_field_is_a_shape_failure() {
        let outcome = assistant_with(StubBackend::replying(r#"{"topics": [], "milestones": []}"#))
            .generate_personalized_path(&web_dev_request(), &CancellationToken::new())
            .await;
        assert!(outcome.is_fallback());
        assert_eq!(outcome.into_value(), LearningPath::default());
    }

    #[tokio::test]
    async fn test_study_plan_decodes_numeric_allocations() {
        let reply = r#"{
            "plan": [{"topic": "Ownership", "timeAllocation": 1.5, "resources": ["The Book ch. 4"], "activities": ["Borrow checker kata"]}],
            "schedule": ["Day 1: Ownership"]
        }"#;
        let outcome = assistant_with(StubBackend::replying(reply))
            .generate_study_plan(
                &StudyPlanRequest {
                    topics: vec!["Ownership".into()],
                    time_available: 6.0,
                    ..StudyPlanRequest::default()
                },
                &CancellationToken::new(),
            )
            .await;

        let plan = outcome.into_value();
        assert_eq!(plan.plan.len(), 1);
        assert!((plan.plan[0].time_allocation - 1.5).abs() < f64::EPSILON);
        assert_eq!(plan.schedule, vec!["Day 1: Ownership".to_string()]);
    }

    #[tokio::test]
    async fn test_study_plan_falls_back_when_backend_errors() {
        let outcome = assistant_with(StubBackend::failing(api_down))
            .generate_study_plan(&StudyPlanRequest::default(), &CancellationToken::new())
            .await;
        assert_eq!(outcome.into_value(), StudyPlan::default());
    }

    #[test]
    fn test_request_defaults_fill_missing_body_fields() {
        let req: LearningPathRequest =
            serde_json::from_str(r#"{"interests": ["Data Science"]}"#).unwrap();
        assert_eq!(req.interests, vec!["Data Science".to_string()]);
        assert!(req.goals.is_empty());
        assert_eq!(req.learning_style, "visual");
        assert_eq!(req.time_commitment, "medium");

        let plan: StudyPlanRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(plan.learning_style, "visual");
    }
}

// All prompt templates for the study assistant.
// Builders are pure: the same input always renders the same prompt.

use serde::Serialize;

use crate::assistant::assessment::AssessmentRequest;
use crate::assistant::content::AdaptContentRequest;
use crate::assistant::feedback::FeedbackRequest;
use crate::assistant::path::{LearningPathRequest, StudyPlanRequest};
use crate::assistant::progress::{LearningProgressRequest, ProgressMetrics};
use crate::assistant::recommendations::RecommendationRequest;
use crate::assistant::schedule::SchedulePatterns;
use crate::assistant::tutoring::StudyAssistanceRequest;
use crate::llm_client::prompts::fill_template;

/// Learning path prompt. Replace: {interests}, {goals}, {level}, {learning_style}, {time_commitment}
pub const LEARNING_PATH_PROMPT: &str = r#"Create a comprehensive personalized learning path for this learner:
Interests: {interests}
Goals: {goals}
Current Level: {level}
Learning Style: {learning_style}
Time Commitment: {time_commitment}

Return a JSON object with this EXACT schema:
{
  "topics": [
    {
      "name": "Topic Name",
      "duration": "Estimated Duration",
      "resources": ["Resource1", "Resource2"],
      "difficulty": "beginner/intermediate/advanced",
      "format": "video/text/interactive/mixed",
      "prerequisites": ["Prerequisite1", "Prerequisite2"],
      "exercises": ["Exercise1", "Exercise2"]
    }
  ],
  "milestones": ["Milestone1", "Milestone2"],
  "estimatedCompletion": "Estimated completion time",
  "adaptiveRecommendations": {
    "pace": "Recommended learning pace",
    "focusAreas": ["Focus Area1", "Focus Area2"],
    "nextSteps": ["Next Step1", "Next Step2"]
  }
}"#;

/// Adaptive assessment prompt. Replace: {topic}, {scores}, {gaps}, {level}, {mistakes}
pub const ASSESSMENT_PROMPT: &str = r#"Generate an intelligent adaptive assessment based on:
- Current topic: {topic}
- Previous scores: {scores}
- Knowledge gaps: {gaps}
- Current level: {level}
- Recent mistakes: {mistakes}

Return a JSON object with this EXACT schema:
{
  "questions": [
    {
      "question": "Question text",
      "options": ["Option1", "Option2", "Option3", "Option4"],
      "correctAnswer": "Correct option",
      "explanation": "Detailed explanation",
      "difficulty": "beginner/intermediate/advanced",
      "conceptTested": "Main concept being tested",
      "hints": ["Hint1", "Hint2"],
      "followUpQuestions": ["Follow-up1", "Follow-up2"]
    }
  ],
  "adaptiveRecommendations": {
    "focusAreas": ["Area1", "Area2"],
    "remedialContent": ["Content1", "Content2"],
    "practiceExercises": ["Exercise1", "Exercise2"]
  }
}"#;

/// Study plan prompt. Replace: {topics}, {hours}, {learning_style}
pub const STUDY_PLAN_PROMPT: &str = r#"Create a study plan based on:
Topics: {topics}
Time Available: {hours} hours
Learning Style: {learning_style}

Return a JSON object with this EXACT schema (timeAllocation is a number of hours):
{
  "plan": [
    {
      "topic": "Topic name",
      "timeAllocation": 2,
      "resources": ["Resource1", "Resource2"],
      "activities": ["Activity1", "Activity2"]
    }
  ],
  "schedule": ["Day 1: Topic1", "Day 2: Topic2"]
}"#;

/// Tutoring prompt. Replace: {query}, {topic}, {level}, {learning_style}, {history}, {previous}
pub const STUDY_ASSISTANCE_PROMPT: &str = r#"Provide intelligent tutoring assistance for:
User Question: {query}
Topic: {topic}
Level: {level}
Learning Style: {learning_style}
Study History: {history}
Previous Interactions: {previous}

Return a JSON object with this EXACT schema:
{
  "explanation": "Clear, personalized explanation",
  "examples": ["Example1", "Example2"],
  "steps": ["Step1", "Step2"],
  "relatedConcepts": ["Concept1", "Concept2"],
  "practiceQuestions": ["Question1", "Question2"],
  "visualAids": ["Visual1", "Visual2"],
  "interactiveElements": ["Element1", "Element2"],
  "furtherResources": ["Resource1", "Resource2"],
  "adaptiveFeedback": {
    "conceptMastery": "Current understanding level",
    "suggestedApproach": "Recommended learning approach",
    "commonMisconceptions": ["Misconception1", "Misconception2"]
  }
}"#;

/// Progress analysis prompt. Replace: {metrics}
pub const PROGRESS_ANALYSIS_PROMPT: &str = r#"Provide comprehensive progress analysis for these learner metrics:
{metrics}

Return a JSON object with this EXACT schema (overallProgress is a number from 0 to 100):
{
  "insights": ["Insight1", "Insight2"],
  "patterns": ["Pattern1", "Pattern2"],
  "suggestions": ["Suggestion1", "Suggestion2"],
  "predictions": ["Prediction1", "Prediction2"],
  "adaptiveRecommendations": {
    "paceAdjustment": "Recommended pace change",
    "methodologyChanges": ["Change1", "Change2"],
    "resourceSuggestions": ["Resource1", "Resource2"],
    "interventionStrategies": ["Strategy1", "Strategy2"]
  },
  "progressReport": {
    "overallProgress": 85,
    "strengthAreas": ["Strength1", "Strength2"],
    "improvementAreas": ["Area1", "Area2"],
    "nextMilestones": ["Milestone1", "Milestone2"]
  }
}"#;

/// Schedule optimization prompt. Replace: {patterns}
pub const SCHEDULE_PROMPT: &str = r#"Create an optimized learning schedule based on these study patterns:
{patterns}

Return a JSON object with this EXACT schema:
{
  "schedule": [
    {
      "time": "HH:MM",
      "topic": "Topic name",
      "duration": "Duration in minutes",
      "type": "study/practice/review",
      "format": "video/reading/interactive",
      "intensity": "high/medium/low",
      "objectives": ["Objective1", "Objective2"]
    }
  ],
  "breaks": [
    {
      "time": "HH:MM",
      "duration": "Duration in minutes",
      "type": "active/passive",
      "recommendation": "Break activity recommendation"
    }
  ],
  "reviews": [
    {
      "time": "HH:MM",
      "topics": ["Topic1", "Topic2"],
      "duration": "Duration in minutes",
      "format": "quiz/summary/practice"
    }
  ],
  "adaptiveRecommendations": {
    "paceAdjustments": ["Adjustment1", "Adjustment2"],
    "focusAreas": ["Area1", "Area2"],
    "methodologyChanges": ["Change1", "Change2"]
  }
}"#;

/// Content adaptation prompt. Replace: {content}, {profile}
pub const ADAPT_CONTENT_PROMPT: &str = r#"Personalize this content for the learner.
Content: {content}
Learner Profile: {profile}

Return a JSON object with this EXACT schema:
{
  "adaptedContent": "Modified content text",
  "examples": ["Example1", "Example2"],
  "exercises": ["Exercise1", "Exercise2"],
  "context": ["Context1", "Context2"],
  "visualAids": ["Visual1", "Visual2"],
  "interactiveElements": ["Element1", "Element2"],
  "assessments": [
    {
      "type": "quiz/practice/project",
      "questions": ["Question1", "Question2"],
      "difficulty": "beginner/intermediate/advanced"
    }
  ],
  "supplementaryResources": [
    {
      "type": "video/article/tutorial",
      "url": "Resource URL",
      "description": "Resource description"
    }
  ]
}"#;

/// Course recommendation prompt. Replace: {profile}, {history}
pub const RECOMMENDATIONS_PROMPT: &str = r#"Generate comprehensive course recommendations based on:
User Profile: {profile}
Learning History: {history}

Return a JSON object with this EXACT schema (matchScore is a number from 0 to 1):
{
  "recommendations": [
    {
      "id": "unique_id",
      "title": "Course Title",
      "description": "Course Description",
      "level": "beginner/intermediate/advanced",
      "matchScore": 0.95,
      "topics": ["Topic1", "Topic2"],
      "format": "video/interactive/mixed",
      "duration": "Estimated duration",
      "prerequisites": ["Prerequisite1", "Prerequisite2"],
      "learningOutcomes": ["Outcome1", "Outcome2"]
    }
  ],
  "learningPath": {
    "sequence": ["Step1", "Step2"],
    "milestones": ["Milestone1", "Milestone2"],
    "timeline": "Estimated completion timeline"
  },
  "skillGaps": ["Gap1", "Gap2"],
  "prerequisites": {
    "Course1": ["Prerequisite1", "Prerequisite2"],
    "Course2": ["Prerequisite3", "Prerequisite4"]
  }
}"#;

/// Learning progress analysis prompt. Replace: {topic}, {responses}, {context}
pub const LEARNING_ANALYSIS_PROMPT: &str = r#"Provide comprehensive learning analysis for:
Topic: {topic}
Responses:
{responses}
Context: {context}

Return a JSON object with this EXACT schema:
{
  "currentAnalysis": {
    "level": "beginner/intermediate/advanced",
    "strengths": ["Strength1", "Strength2"],
    "improvements": ["Improvement1", "Improvement2"],
    "nextTopics": ["Topic1", "Topic2"]
  },
  "progressTrends": {
    "improvement": ["Trend1", "Trend2"],
    "challenges": ["Challenge1", "Challenge2"],
    "velocity": "Learning pace assessment"
  },
  "recommendations": {
    "nextSteps": ["Step1", "Step2"],
    "resources": ["Resource1", "Resource2"],
    "practiceAreas": ["Area1", "Area2"]
  },
  "adaptiveContent": {
    "format": "Recommended content format",
    "difficulty": "Recommended difficulty level",
    "focus": ["Focus1", "Focus2"]
  }
}"#;

/// Free-text feedback prompt. Replace: {topic}, {response}
pub const FEEDBACK_PROMPT: &str = r#"Analyze this student response for the topic "{topic}" and provide constructive feedback.
Answer in plain prose, not JSON.

Student Response: {response}

Please provide:
1. Understanding level (Beginner/Intermediate/Advanced)
2. Key strengths
3. Areas for improvement
4. Suggested next topics"#;

fn list(items: &[String]) -> String {
    items.join(", ")
}

fn json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

pub fn learning_path_prompt(req: &LearningPathRequest) -> String {
    fill_template(
        LEARNING_PATH_PROMPT,
        &[
            ("interests", list(&req.interests).as_str()),
            ("goals", list(&req.goals).as_str()),
            ("level", req.current_level.as_str()),
            ("learning_style", req.learning_style.as_str()),
            ("time_commitment", req.time_commitment.as_str()),
        ],
    )
}

pub fn assessment_prompt(req: &AssessmentRequest) -> String {
    fill_template(
        ASSESSMENT_PROMPT,
        &[
            ("topic", req.current_topic.as_str()),
            ("scores", json(&req.scores).as_str()),
            ("gaps", list(&req.gaps).as_str()),
            ("level", req.level.as_str()),
            ("mistakes", list(&req.recent_mistakes).as_str()),
        ],
    )
}

pub fn study_plan_prompt(req: &StudyPlanRequest) -> String {
    fill_template(
        STUDY_PLAN_PROMPT,
        &[
            ("topics", list(&req.topics).as_str()),
            ("hours", req.time_available.to_string().as_str()),
            ("learning_style", req.learning_style.as_str()),
        ],
    )
}

pub fn study_assistance_prompt(req: &StudyAssistanceRequest) -> String {
    let ctx = &req.context;
    fill_template(
        STUDY_ASSISTANCE_PROMPT,
        &[
            ("query", req.query.as_str()),
            ("topic", ctx.topic.as_str()),
            ("level", ctx.level.as_str()),
            ("learning_style", ctx.learning_style.as_str()),
            ("history", list(&ctx.history).as_str()),
            ("previous", json(&ctx.previous_responses).as_str()),
        ],
    )
}

pub fn progress_analysis_prompt(metrics: &ProgressMetrics) -> String {
    fill_template(PROGRESS_ANALYSIS_PROMPT, &[("metrics", json(metrics).as_str())])
}

pub fn schedule_prompt(patterns: &SchedulePatterns) -> String {
    fill_template(SCHEDULE_PROMPT, &[("patterns", json(patterns).as_str())])
}

pub fn adapt_content_prompt(req: &AdaptContentRequest) -> String {
    fill_template(
        ADAPT_CONTENT_PROMPT,
        &[("content", req.content.as_str()), ("profile", json(&req.profile).as_str())],
    )
}

pub fn recommendations_prompt(req: &RecommendationRequest) -> String {
    fill_template(
        RECOMMENDATIONS_PROMPT,
        &[
            ("profile", json(&req.profile).as_str()),
            ("history", json(&req.history).as_str()),
        ],
    )
}

pub fn learning_analysis_prompt(req: &LearningProgressRequest) -> String {
    fill_template(
        LEARNING_ANALYSIS_PROMPT,
        &[
            ("topic", req.topic.as_str()),
            ("responses", req.responses.join("\n").as_str()),
            ("context", json(&req.context).as_str()),
        ],
    )
}

pub fn feedback_prompt(req: &FeedbackRequest) -> String {
    fill_template(
        FEEDBACK_PROMPT,
        &[("topic", req.topic.as_str()), ("response", req.response.as_str())],
    )
}

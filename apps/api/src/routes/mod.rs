pub mod health;

use axum::{
    routing::{get, patch, post, put},
    Router,
};

use crate::assistant::handlers as ai;
use crate::courses::handlers as courses;
use crate::dashboard::handlers as dashboard;
use crate::session::handlers as session;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Session API
        .route(
            "/api/v1/session",
            post(session::handle_register)
                .get(session::handle_get_session)
                .put(session::handle_update_profile)
                .delete(session::handle_logout),
        )
        .route("/api/v1/session/demo", post(session::handle_demo_login))
        .route(
            "/api/v1/session/progress",
            patch(session::handle_update_progress),
        )
        // Courses API
        .route("/api/v1/courses", get(courses::handle_catalog))
        .route("/api/v1/courses/search", get(courses::handle_search))
        .route(
            "/api/v1/courses/playlists/:id",
            get(courses::handle_playlist),
        )
        // Dashboard API
        .route(
            "/api/v1/dashboard/overview",
            get(dashboard::handle_overview),
        )
        .route(
            "/api/v1/dashboard/profile",
            put(dashboard::handle_save_profile),
        )
        .route(
            "/api/v1/dashboard/schedule",
            get(dashboard::handle_schedule),
        )
        .route(
            "/api/v1/dashboard/courses/:id",
            get(dashboard::handle_course_focus),
        )
        // AI API
        .route("/api/v1/ai/learning-path", post(ai::handle_learning_path))
        .route("/api/v1/ai/assessment", post(ai::handle_assessment))
        .route("/api/v1/ai/study-plan", post(ai::handle_study_plan))
        .route("/api/v1/ai/assistance", post(ai::handle_assistance))
        .route("/api/v1/ai/progress", post(ai::handle_progress))
        .route("/api/v1/ai/schedule", post(ai::handle_schedule))
        .route("/api/v1/ai/adapt", post(ai::handle_adapt))
        .route(
            "/api/v1/ai/recommendations",
            post(ai::handle_recommendations),
        )
        .route(
            "/api/v1/ai/learning-analysis",
            post(ai::handle_learning_analysis),
        )
        .route("/api/v1/ai/feedback", post(ai::handle_feedback))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::assistant::testing::{api_down, assistant_with, StubBackend};
    use crate::config::Config;
    use crate::llm_client::DEFAULT_API_BASE;
    use crate::session::{
        InMemorySessionStore, DEFAULT_IDLE_MINUTES, DEFAULT_MAX_SESSIONS, SESSION_HEADER,
    };

    fn app(backend: Arc<StubBackend>) -> Router {
        build_router(AppState {
            assistant: assistant_with(backend),
            sessions: Arc::new(InMemorySessionStore::default()),
            videos: None,
            config: Config {
                gemini_api_key: None,
                gemini_api_base: DEFAULT_API_BASE.to_string(),
                youtube_api_key: None,
                port: 0,
                max_sessions: DEFAULT_MAX_SESSIONS,
                session_idle_minutes: DEFAULT_IDLE_MINUTES,
                rust_log: "info".to_string(),
            },
        })
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        session: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(id) = session {
            builder = builder.header(SESSION_HEADER, id);
        }
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn register(app: &Router) -> String {
        let (status, body) = send(
            app,
            "POST",
            "/api/v1/session",
            None,
            Some(json!({"name": "Ada", "email": "ada@example.com", "interests": ["Rust"]})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        body["sessionId"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health_reports_missing_keys() {
        let app = app(StubBackend::replying("{}"));
        let (status, body) = send(&app, "GET", "/health", None, None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["service"], "learnhub-api");
        assert_eq!(body["ai"], false);
        assert_eq!(body["videoSearch"], false);
    }

    #[tokio::test]
    async fn test_session_lifecycle() {
        let app = app(StubBackend::replying("{}"));
        let id = register(&app).await;

        let (status, body) = send(
            &app,
            "PATCH",
            "/api/v1/session/progress",
            Some(&id),
            Some(json!({"topic": "rust", "progress": 40})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["progress"]["rust"], 40);

        let (status, body) = send(&app, "GET", "/api/v1/session", Some(&id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["level"], "beginner");

        let (status, _) = send(&app, "DELETE", "/api/v1/session", Some(&id), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = send(&app, "GET", "/api/v1/session", Some(&id), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_progress_above_100_is_rejected() {
        let app = app(StubBackend::replying("{}"));
        let id = register(&app).await;

        let (status, body) = send(
            &app,
            "PATCH",
            "/api/v1/session/progress",
            Some(&id),
            Some(json!({"topic": "rust", "progress": 120})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_demo_login_seeds_progress() {
        let app = app(StubBackend::replying("{}"));
        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/session/demo",
            None,
            Some(json!({"email": "demo@example.com"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["progress"]["react"], 65);
        assert_eq!(body["user"]["progress"]["python"], 30);
    }

    #[tokio::test]
    async fn test_ai_endpoint_reports_fallback_with_200() {
        let app = app(StubBackend::failing(api_down));
        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/ai/learning-path",
            None,
            Some(json!({"interests": ["DevOps"], "goals": [], "currentLevel": "beginner"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "fallback");
        assert_eq!(body["reason"]["kind"], "unavailable");
        assert_eq!(body["data"]["topics"], json!([]));
    }

    #[tokio::test]
    async fn test_feedback_endpoint_returns_generated_text() {
        let app = app(StubBackend::replying("  Nice work on closures.  "));
        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/ai/feedback",
            None,
            Some(json!({"response": "A closure captures its environment", "topic": "rust"})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "generated");
        assert_eq!(body["data"], "Nice work on closures.");
    }

    #[tokio::test]
    async fn test_ai_endpoint_rejects_unknown_session() {
        let app = app(StubBackend::replying("{}"));
        let stale = uuid::Uuid::new_v4().to_string();
        let (status, _) = send(
            &app,
            "POST",
            "/api/v1/ai/assessment",
            Some(&stale),
            Some(json!({"currentTopic": "rust"})),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_overview_requires_session() {
        let app = app(StubBackend::replying("{}"));
        let (status, body) = send(&app, "GET", "/api/v1/dashboard/overview", None, None).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_overview_falls_back_per_section() {
        let backend = StubBackend::replying("not json");
        let app = app(backend.clone());
        let id = register(&app).await;

        let (status, body) =
            send(&app, "GET", "/api/v1/dashboard/overview", Some(&id), None).await;

        assert_eq!(status, StatusCode::OK);
        for section in ["learningPath", "recommendations", "insights"] {
            assert_eq!(body[section]["status"], "fallback", "{section}");
            assert_eq!(body[section]["reason"]["kind"], "malformed", "{section}");
        }
        assert_eq!(body["insights"]["data"]["patterns"], json!([]));
        assert_eq!(backend.prompts.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_course_focus_unknown_course_is_not_found() {
        let app = app(StubBackend::replying("{}"));
        let id = register(&app).await;

        let (status, _) = send(&app, "GET", "/api/v1/dashboard/courses/99", Some(&id), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_course_focus_runs_two_facades() {
        let backend = StubBackend::replying("{}");
        let app = app(backend.clone());
        let id = register(&app).await;

        let (status, body) = send(&app, "GET", "/api/v1/dashboard/courses/1", Some(&id), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["course"]["title"], "React Fundamentals");
        // "{}" lacks the required fields, so both sections fall back.
        assert_eq!(body["assessment"]["status"], "fallback");
        assert_eq!(body["schedule"]["status"], "fallback");
        assert_eq!(backend.prompts.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_video_search_without_key_is_unavailable() {
        let app = app(StubBackend::replying("{}"));
        let (status, body) = send(&app, "GET", "/api/v1/courses/search?q=rust", None, None).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"]["code"], "UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_catalog_lists_demo_courses() {
        let app = app(StubBackend::replying("{}"));
        let (status, body) = send(&app, "GET", "/api/v1/courses", None, None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["enrolled"].as_array().unwrap().len(), 3);
        assert_eq!(body["completed"][0]["completedDate"], "2024-02-15");
    }

    #[tokio::test]
    async fn test_profile_save_regenerates_path_and_plan() {
        let backend = StubBackend::replying("not json");
        let app = app(backend.clone());
        let id = register(&app).await;

        let (status, body) = send(
            &app,
            "PUT",
            "/api/v1/dashboard/profile",
            Some(&id),
            Some(json!({"level": "advanced", "interests": ["Distributed Systems"]})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["level"], "advanced");
        assert_eq!(body["user"]["name"], "Ada");
        assert_eq!(body["learningPath"]["status"], "fallback");
        assert_eq!(body["studyPlan"]["status"], "fallback");
        assert_eq!(body["studyPlan"]["data"]["plan"], json!([]));

        // Both prompts are built from the saved profile, not the old one.
        let prompts = backend.prompts.lock().unwrap().clone();
        assert_eq!(prompts.len(), 2);
        assert!(prompts.iter().all(|p| p.contains("Distributed Systems")));
        assert!(prompts.iter().all(|p| !p.contains("Rust")));

        let (_, session) = send(&app, "GET", "/api/v1/session", Some(&id), None).await;
        assert_eq!(session["user"]["level"], "advanced");
    }

    #[tokio::test]
    async fn test_profile_save_requires_session() {
        let backend = StubBackend::replying("{}");
        let app = app(backend.clone());

        let (status, _) = send(
            &app,
            "PUT",
            "/api/v1/dashboard/profile",
            None,
            Some(json!({"level": "advanced"})),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(backend.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_weekly_schedule_uses_goals_and_fixed_topics() {
        let reply = json!({
            "schedule": [{
                "time": "09:00", "topic": "React", "duration": "60m", "type": "learning",
                "format": "video", "intensity": "medium", "objectives": ["hooks"]
            }],
            "breaks": [],
            "reviews": [],
            "adaptiveRecommendations": {
                "paceAdjustments": [], "focusAreas": ["React"], "methodologyChanges": []
            }
        });
        let backend = StubBackend::replying(&reply.to_string());
        let app = app(backend.clone());
        let id = register(&app).await;

        let (status, body) = send(&app, "GET", "/api/v1/dashboard/schedule", Some(&id), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "generated");
        assert_eq!(body["data"]["schedule"][0]["type"], "learning");

        let prompt = backend.last_prompt();
        assert!(prompt.contains("Python"));
        assert!(prompt.contains("09:00-12:00"));
    }

    #[tokio::test]
    async fn test_weekly_schedule_requires_session() {
        let app = app(StubBackend::replying("{}"));
        let (status, _) = send(&app, "GET", "/api/v1/dashboard/schedule", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}

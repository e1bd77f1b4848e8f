mod assistant;
mod config;
mod courses;
mod dashboard;
mod errors;
mod llm_client;
mod routes;
mod session;
mod state;

use anyhow::Result;
use chrono::Duration;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::assistant::StudyAssistant;
use crate::config::Config;
use crate::courses::youtube::{VideoSearch, YouTubeClient};
use crate::llm_client::GeminiClient;
use crate::routes::build_router;
use crate::session::InMemorySessionStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting LearnHub API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    if config.gemini_api_key.is_none() {
        warn!("GEMINI_API_KEY is not set; AI endpoints will answer with fallbacks");
    }
    let llm = GeminiClient::with_base_url(config.gemini_api_key.clone(), &config.gemini_api_base);
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Initialize video search
    let videos = config.youtube_api_key.clone().map(|key| {
        info!("YouTube client initialized");
        Arc::new(YouTubeClient::new(key)) as Arc<dyn VideoSearch>
    });
    if videos.is_none() {
        warn!("YOUTUBE_API_KEY is not set; course search is disabled");
    }

    let state = AppState {
        assistant: StudyAssistant::new(Arc::new(llm)),
        sessions: Arc::new(InMemorySessionStore::with_limits(
            config.max_sessions,
            Duration::minutes(i64::from(config.session_idle_minutes)),
        )),
        videos,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the frontend host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

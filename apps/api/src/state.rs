use std::sync::Arc;

use crate::assistant::StudyAssistant;
use crate::config::Config;
use crate::courses::youtube::VideoSearch;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub assistant: StudyAssistant,
    /// Injected session context. The in-memory store by default.
    pub sessions: Arc<dyn SessionStore>,
    /// `None` when no YouTube key is configured.
    pub videos: Option<Arc<dyn VideoSearch>>,
    pub config: Config,
}

//! Session context: the signed-in learner's profile, held in memory only.
//!
//! `AppState` carries an `Arc<dyn SessionStore>`; nothing reads sessions
//! through globals. Each session owns a cancellation token: AI requests made
//! under the session derive child tokens from it, so ending the session
//! aborts whatever is still in flight.

pub mod handlers;

use std::collections::{BTreeMap, HashMap};
use std::sync::{PoisonError, RwLock};

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;

pub const SESSION_HEADER: &str = "x-session-id";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session {0} not found")]
    NotFound(Uuid),

    #[error("Progress for '{topic}' must be between 0 and 100, got {value}")]
    ProgressOutOfRange { topic: String, value: u32 },

    #[error("{0}")]
    Validation(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub level: String,
    pub interests: Vec<String>,
    pub goals: Vec<String>,
    /// Topic → percent complete (0 – 100).
    pub progress: BTreeMap<String, u8>,
}

/// Registration payload. Progress always starts empty.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProfile {
    #[serde(default)]
    pub name: String,
    pub email: String,
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub goals: Vec<String>,
}

fn default_level() -> String {
    "beginner".to_string()
}

/// Settings-page edits. Absent fields are left as they are.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub level: Option<String>,
    pub interests: Option<Vec<String>>,
    pub goals: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub session_id: Uuid,
    pub user: UserProfile,
    pub signed_in_at: DateTime<Utc>,
}

/// Read/mutate interface over the signed-in learners.
pub trait SessionStore: Send + Sync {
    fn start(&self, profile: NewProfile) -> Result<SessionInfo, SessionError>;
    fn get(&self, session_id: Uuid) -> Result<SessionInfo, SessionError>;
    fn update_profile(
        &self,
        session_id: Uuid,
        update: ProfileUpdate,
    ) -> Result<UserProfile, SessionError>;
    fn update_progress(
        &self,
        session_id: Uuid,
        topic: &str,
        progress: u32,
    ) -> Result<UserProfile, SessionError>;
    /// Token that fires when the session ends.
    fn cancellation(&self, session_id: Uuid) -> Result<CancellationToken, SessionError>;
    fn end(&self, session_id: Uuid) -> Result<(), SessionError>;
}

struct SessionEntry {
    user: UserProfile,
    signed_in_at: DateTime<Utc>,
    last_seen: DateTime<Utc>,
    cancel: CancellationToken,
}

impl SessionEntry {
    fn info(&self, session_id: Uuid) -> SessionInfo {
        SessionInfo {
            session_id,
            user: self.user.clone(),
            signed_in_at: self.signed_in_at,
        }
    }
}

pub const DEFAULT_MAX_SESSIONS: usize = 1_000;
pub const DEFAULT_IDLE_MINUTES: u32 = 120;

/// Process-local store. Everything is lost on restart.
///
/// Bounded two ways: a session idle longer than `idle_ttl` is dropped on its
/// next access or on the next sign-in, and once `max_sessions` are live a new
/// sign-in evicts the least recently used one. Dropping a session cancels its
/// token like a logout does.
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<Uuid, SessionEntry>>,
    max_sessions: usize,
    idle_ttl: Duration,
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::with_limits(
            DEFAULT_MAX_SESSIONS,
            Duration::minutes(i64::from(DEFAULT_IDLE_MINUTES)),
        )
    }
}

impl InMemorySessionStore {
    pub fn with_limits(max_sessions: usize, idle_ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            max_sessions: max_sessions.max(1),
            idle_ttl,
        }
    }

    fn is_idle(&self, entry: &SessionEntry, now: DateTime<Utc>) -> bool {
        now - entry.last_seen > self.idle_ttl
    }

    /// Removes idle sessions, cancelling their tokens. Returns how many went.
    fn sweep(&self, sessions: &mut HashMap<Uuid, SessionEntry>, now: DateTime<Utc>) -> usize {
        let idle: Vec<Uuid> = sessions
            .iter()
            .filter(|(_, entry)| self.is_idle(entry, now))
            .map(|(id, _)| *id)
            .collect();

        for id in &idle {
            if let Some(entry) = sessions.remove(id) {
                entry.cancel.cancel();
            }
        }
        idle.len()
    }

    fn evict_least_recent(sessions: &mut HashMap<Uuid, SessionEntry>) {
        let oldest = sessions
            .iter()
            .min_by_key(|(_, entry)| entry.last_seen)
            .map(|(id, _)| *id);

        if let Some(entry) = oldest.and_then(|id| sessions.remove(&id)) {
            entry.cancel.cancel();
            info!("Session for {} evicted: store is full", entry.user.email);
        }
    }

    /// Runs `f` on a live session and marks it as used.
    fn with_entry<T>(
        &self,
        session_id: Uuid,
        f: impl FnOnce(&mut SessionEntry) -> Result<T, SessionError>,
    ) -> Result<T, SessionError> {
        let now = Utc::now();
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);

        let idle = match sessions.get(&session_id) {
            Some(entry) => self.is_idle(entry, now),
            None => return Err(SessionError::NotFound(session_id)),
        };
        if idle {
            if let Some(entry) = sessions.remove(&session_id) {
                entry.cancel.cancel();
            }
            info!("Session {session_id} expired");
            return Err(SessionError::NotFound(session_id));
        }

        let entry = sessions
            .get_mut(&session_id)
            .ok_or(SessionError::NotFound(session_id))?;
        entry.last_seen = now;
        f(entry)
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl SessionStore for InMemorySessionStore {
    fn start(&self, profile: NewProfile) -> Result<SessionInfo, SessionError> {
        if profile.email.trim().is_empty() {
            return Err(SessionError::Validation("email cannot be empty".to_string()));
        }

        let now = Utc::now();
        let session_id = Uuid::new_v4();
        let entry = SessionEntry {
            user: UserProfile {
                id: Uuid::new_v4(),
                name: profile.name,
                email: profile.email,
                level: profile.level,
                interests: profile.interests,
                goals: profile.goals,
                progress: BTreeMap::new(),
            },
            signed_in_at: now,
            last_seen: now,
            cancel: CancellationToken::new(),
        };
        let info = entry.info(session_id);

        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        let expired = self.sweep(&mut sessions, now);
        if expired > 0 {
            debug!("Dropped {expired} idle sessions");
        }
        while sessions.len() >= self.max_sessions {
            Self::evict_least_recent(&mut sessions);
        }
        sessions.insert(session_id, entry);
        drop(sessions);

        info!("Session {session_id} started for {}", info.user.email);
        Ok(info)
    }

    fn get(&self, session_id: Uuid) -> Result<SessionInfo, SessionError> {
        self.with_entry(session_id, |entry| Ok(entry.info(session_id)))
    }

    fn update_profile(
        &self,
        session_id: Uuid,
        update: ProfileUpdate,
    ) -> Result<UserProfile, SessionError> {
        if matches!(&update.email, Some(email) if email.trim().is_empty()) {
            return Err(SessionError::Validation("email cannot be empty".to_string()));
        }

        self.with_entry(session_id, |entry| {
            let user = &mut entry.user;
            if let Some(name) = update.name {
                user.name = name;
            }
            if let Some(email) = update.email {
                user.email = email;
            }
            if let Some(level) = update.level {
                user.level = level;
            }
            if let Some(interests) = update.interests {
                user.interests = interests;
            }
            if let Some(goals) = update.goals {
                user.goals = goals;
            }
            Ok(user.clone())
        })
    }

    fn update_progress(
        &self,
        session_id: Uuid,
        topic: &str,
        progress: u32,
    ) -> Result<UserProfile, SessionError> {
        let value = u8::try_from(progress)
            .ok()
            .filter(|v| *v <= 100)
            .ok_or_else(|| SessionError::ProgressOutOfRange {
                topic: topic.to_string(),
                value: progress,
            })?;

        self.with_entry(session_id, |entry| {
            entry.user.progress.insert(topic.to_string(), value);
            Ok(entry.user.clone())
        })
    }

    fn cancellation(&self, session_id: Uuid) -> Result<CancellationToken, SessionError> {
        self.with_entry(session_id, |entry| Ok(entry.cancel.clone()))
    }

    fn end(&self, session_id: Uuid) -> Result<(), SessionError> {
        let entry = self
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&session_id)
            .ok_or(SessionError::NotFound(session_id))?;

        entry.cancel.cancel();
        info!("Session {session_id} ended");
        Ok(())
    }
}

/// The profile handed out by the demo sign-in.
pub fn demo_profile(email: &str) -> NewProfile {
    NewProfile {
        name: "Demo User".to_string(),
        email: email.to_string(),
        level: "Intermediate".to_string(),
        interests: vec![
            "Web Development".to_string(),
            "Machine Learning".to_string(),
            "Data Science".to_string(),
        ],
        goals: vec![
            "Complete React Course".to_string(),
            "Build 5 Projects".to_string(),
            "Learn Python".to_string(),
        ],
    }
}

/// Seed progress for the demo learner, applied right after sign-in.
pub const DEMO_PROGRESS: [(&str, u32); 3] = [("react", 65), ("python", 30), ("javascript", 80)];

/// Session id taken from the `x-session-id` header.
///
/// Use `Option<SessionId>` for routes where a session is optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for SessionId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(SESSION_HEADER)
            .ok_or(AppError::Unauthorized)?
            .to_str()
            .map_err(|_| AppError::Validation(format!("{SESSION_HEADER} is not valid text")))?;

        Uuid::parse_str(raw.trim())
            .map(SessionId)
            .map_err(|_| AppError::Validation(format!("{SESSION_HEADER} must be a UUID")))
    }
}

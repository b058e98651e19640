//! In-memory cookie sessions for the form flow.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use archive_core::config::SessionConfig;
use archive_core::error::AppError;
use archive_core::types::UserId;
use archive_entity::user::{User, UserRole};

/// What a form session remembers about its user.
#[derive(Debug, Clone, PartialEq)]
pub struct FormSession {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub expires_at: DateTime<Utc>,
}

impl FormSession {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Session ids (random UUIDs) mapped to their sessions.
#[derive(Debug)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, FormSession>>,
    ttl: Duration,
    cookie_name: String,
}

impl SessionStore {
    /// Creates an empty store.
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl: Duration::minutes(config.ttl_minutes as i64),
            cookie_name: config.cookie_name.clone(),
        }
    }

    /// Name of the session cookie.
    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Start a session for a saved user and return its id.
    pub async fn create(&self, user: &User) -> Result<String, AppError> {
        let user_id = user
            .id
            .ok_or_else(|| AppError::internal("Cannot open a session for an unsaved user"))?;
        let id = Uuid::new_v4().to_string();
        let session = FormSession {
            user_id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            expires_at: Utc::now() + self.ttl,
        };
        self.sessions.write().await.insert(id.clone(), session);
        info!(user_id = %user_id, "Form session created");
        Ok(id)
    }

    /// A live session, if `id` names one.
    pub async fn get(&self, id: &str) -> Option<FormSession> {
        let now = Utc::now();
        {
            let sessions = self.sessions.read().await;
            match sessions.get(id) {
                Some(session) if !session.is_expired(now) => return Some(session.clone()),
                Some(_) => {}
                None => return None,
            }
        }
        debug!("Dropping expired form session");
        self.sessions.write().await.remove(id);
        None
    }

    /// End a session, returning it when it was still live.
    pub async fn invalidate(&self, id: &str) -> Option<FormSession> {
        let removed = self.sessions.write().await.remove(id)?;
        if removed.is_expired(Utc::now()) {
            return None;
        }
        info!(user_id = %removed.user_id, "Form session invalidated");
        Some(removed)
    }

    /// Remove every expired session; returns how many were dropped.
    pub async fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired(now));
        before - sessions.len()
    }

    /// `Set-Cookie` value carrying a session id.
    pub fn session_cookie(&self, id: &str) -> String {
        format!(
            "{}={}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
            self.cookie_name,
            id,
            self.ttl.num_seconds()
        )
    }

    /// `Set-Cookie` value that removes the session cookie.
    pub fn expired_cookie(&self) -> String {
        format!("{}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0", self.cookie_name)
    }
}

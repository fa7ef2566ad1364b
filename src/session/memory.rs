use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{SessionError, SessionId, SessionStore};

const MAX_TTL_SECS: u64 = 365 * 24 * 60 * 60;

/// In-process session store. Sessions are lost on restart, which just sends
/// students back to the login form.
pub struct MemorySessionStore {
    ttl: Duration,
    sessions: RwLock<HashMap<SessionId, DateTime<Utc>>>,
}

impl MemorySessionStore {
    pub fn new(ttl_secs: u64) -> Self {
        Self::with_ttl(Duration::seconds(ttl_secs.min(MAX_TTL_SECS) as i64))
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn create(&self) -> Result<SessionId, SessionError> {
        let now = Utc::now();
        let id = Uuid::new_v4().simple().to_string();

        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, expires_at| *expires_at > now);
        sessions.insert(id.clone(), now + self.ttl);

        Ok(id)
    }

    async fn is_authenticated(&self, id: &str) -> Result<bool, SessionError> {
        let expires_at = match self.sessions.read().await.get(id) {
            Some(expires_at) => *expires_at,
            None => return Ok(false),
        };

        if expires_at <= Utc::now() {
            self.sessions.write().await.remove(id);
            return Ok(false);
        }

        Ok(true)
    }

    async fn destroy(&self, id: &str) -> Result<(), SessionError> {
        self.sessions.write().await.remove(id);
        Ok(())
    }

    async fn purge_expired(&self) -> Result<usize, SessionError> {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, expires_at| *expires_at > now);
        Ok(before - sessions.len())
    }
}

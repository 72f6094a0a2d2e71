use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::entities::AdminSession;
use crate::domain::repositories::SessionRepository;
use crate::error::AppError;

/// Sessions kept in process memory; every admin is logged out on restart.
#[derive(Debug, Default)]
pub struct InMemorySessionRepository {
    sessions: RwLock<HashMap<String, AdminSession>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn create(&self, session: AdminSession) -> Result<(), AppError> {
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(&session.token_hash) {
            return Err(AppError::conflict("Session already exists", json!({})));
        }
        sessions.insert(session.token_hash.clone(), session);
        Ok(())
    }

    async fn find(&self, token_hash: &str) -> Result<Option<AdminSession>, AppError> {
        Ok(self.sessions.read().await.get(token_hash).cloned())
    }

    async fn touch(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        if let Some(session) = self.sessions.write().await.get_mut(token_hash) {
            session.last_seen_at = now;
            session.expires_at = expires_at;
        }
        Ok(())
    }

    async fn delete(&self, token_hash: &str) -> Result<bool, AppError> {
        Ok(self.sessions.write().await.remove(token_hash).is_some())
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<Vec<String>, AppError> {
        let mut sessions = self.sessions.write().await;
        let expired: Vec<String> = sessions
            .values()
            .filter(|s| s.is_expired(now))
            .map(|s| s.token_hash.clone())
            .collect();
        for hash in &expired {
            sessions.remove(hash);
        }
        Ok(expired)
    }
}

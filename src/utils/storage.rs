use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info};
use uuid::Uuid;

use crate::repositories::PaginationController;

/// Open repository-browsing sessions, keyed by id. A session expires after
/// `ttl` without being accessed.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, StoredSession>>>,
    ttl: Duration,
}

struct StoredSession {
    controller: Arc<PaginationController>,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    pub fn open(&self, controller: Arc<PaginationController>) -> Uuid {
        let id = Uuid::new_v4();
        let now = Utc::now();
        let username = controller.username().to_string();
        let stored = StoredSession {
            controller,
            created_at: now,
            expires_at: now + self.ttl,
        };

        {
            let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
            sessions.insert(id, stored);

            // Cleanup expired sessions while we have the write lock
            Self::cleanup_expired(&mut sessions);
        }

        info!("Opened repository session {} for user: {}", id, username);
        id
    }

    /// Returns the live session and pushes its expiry forward.
    pub fn get(&self, id: &Uuid) -> Option<Arc<PaginationController>> {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        let now = Utc::now();

        if let Some(stored) = sessions.get_mut(id) {
            if stored.expires_at > now {
                stored.expires_at = now + self.ttl;
                return Some(stored.controller.clone());
            }
            debug!(
                "Session {} expired (opened at {}), removing",
                id, stored.created_at
            );
            sessions.remove(id);
        }

        debug!("Session not found: {}", id);
        None
    }

    pub fn close(&self, id: &Uuid) -> bool {
        let removed = self
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id)
            .is_some();
        if removed {
            info!("Closed repository session {}", id);
        }
        removed
    }

    fn cleanup_expired(sessions: &mut HashMap<Uuid, StoredSession>) {
        let now = Utc::now();
        let before_count = sessions.len();

        sessions.retain(|_, session| session.expires_at > now);

        let after_count = sessions.len();
        if before_count != after_count {
            debug!("Cleaned up {} expired sessions", before_count - after_count);
        }
    }

    pub fn stats(&self) -> StorageStats {
        let sessions = self.sessions.read().unwrap_or_else(PoisonError::into_inner);
        let now = Utc::now();

        let active_sessions = sessions.values().filter(|s| s.expires_at > now).count();

        StorageStats {
            total_sessions: sessions.len(),
            active_sessions,
            expired_sessions: sessions.len() - active_sessions,
        }
    }
}

#[derive(Debug, serde::Serialize)]
pub struct StorageStats {
    pub total_sessions: usize,
    pub active_sessions: usize,
    pub expired_sessions: usize,
}

//! Session storage implementation
//!
//! In-memory store of per-chat sessions. The application holds no durable
//! state: everything here evaporates on restart, which is the intended
//! lifecycle for a concierge conversation.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use super::context::SessionContext;

/// Shared in-memory session store keyed by chat id
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<i64, SessionContext>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a snapshot of a session, if one exists
    pub async fn load(&self, chat_id: i64) -> Option<SessionContext> {
        let sessions = self.sessions.read().await;
        sessions.get(&chat_id).cloned()
    }

    /// Load a snapshot of a session, creating a fresh one if needed
    pub async fn load_or_create(&self, chat_id: i64) -> SessionContext {
        if let Some(session) = self.load(chat_id).await {
            return session;
        }
        let mut sessions = self.sessions.write().await;
        sessions
            .entry(chat_id)
            .or_insert_with(|| {
                debug!(chat_id = chat_id, "Creating new session");
                SessionContext::new(chat_id)
            })
            .clone()
    }

    /// Persist a session snapshot
    pub async fn save(&self, session: SessionContext) {
        let mut sessions = self.sessions.write().await;
        debug!(
            chat_id = session.chat_id,
            view = session.view.name(),
            cart_len = session.cart.len(),
            "Saving session"
        );
        sessions.insert(session.chat_id, session);
    }

    /// Mutate a session in place under the write lock, creating it first if
    /// needed, and return the closure's result.
    pub async fn update<F, T>(&self, chat_id: i64, f: F) -> T
    where
        F: FnOnce(&mut SessionContext) -> T,
    {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .entry(chat_id)
            .or_insert_with(|| SessionContext::new(chat_id));
        let result = f(session);
        session.touch();
        result
    }

    /// Drop a session entirely
    pub async fn delete(&self, chat_id: i64) -> bool {
        let mut sessions = self.sessions.write().await;
        sessions.remove(&chat_id).is_some()
    }

    /// Number of live sessions
    pub async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::context::TurnRole;

    #[tokio::test]
    async fn test_load_or_create_then_load() {
        let store = SessionStore::new();
        assert!(store.load(7).await.is_none());

        let session = store.load_or_create(7).await;
        assert_eq!(session.chat_id, 7);
        assert!(store.load(7).await.is_some());
        assert_eq!(store.count().await, 1);
    }

    #[tokio::test]
    async fn test_update_mutates_in_place() {
        let store = SessionStore::new();
        store
            .update(9, |session| {
                session.push_turn(TurnRole::Visitor, "hello");
            })
            .await;

        let session = store.load(9).await.unwrap();
        assert_eq!(session.transcript.len(), 1);
    }

    #[tokio::test]
    async fn test_delete() {
        let store = SessionStore::new();
        store.load_or_create(3).await;
        assert!(store.delete(3).await);
        assert!(!store.delete(3).await);
        assert_eq!(store.count().await, 0);
    }
}

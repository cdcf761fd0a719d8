use std::collections::HashMap;
use std::sync::Arc;

use freshboard_core::DashboardSession;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::error::ServiceError;

pub type SharedSession = Arc<Mutex<DashboardSession>>;

/// In-memory table of live dashboard sessions, keyed by token.
///
/// Sessions never outlive the process.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<Uuid, SharedSession>>,
}

impl SessionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, session: DashboardSession) -> SharedSession {
        let token = session.token;
        let shared = Arc::new(Mutex::new(session));
        self.sessions.write().await.insert(token, Arc::clone(&shared));
        shared
    }

    pub async fn get(&self, token: &Uuid) -> Result<SharedSession, ServiceError> {
        self.sessions.read().await.get(token).cloned().ok_or(ServiceError::SessionNotFound)
    }

    /// Returns whether a session was removed.
    pub async fn remove(&self, token: &Uuid) -> bool {
        self.sessions.write().await.remove(token).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use freshboard_core::TableName;

    fn session(user: &str) -> DashboardSession {
        DashboardSession::new(user.to_owned(), "Acme".to_owned(), TableName::new("acme").unwrap())
    }

    #[tokio::test]
    async fn insert_get_remove() {
        let registry = SessionRegistry::new();
        let s = session("mario");
        let token = s.token;
        registry.insert(s).await;

        let shared = registry.get(&token).await.unwrap();
        shared.lock().await.select_qr("QR-1");
        let again = registry.get(&token).await.unwrap();
        assert_eq!(again.lock().await.selected_qr.as_deref(), Some("QR-1"));

        assert!(registry.remove(&token).await);
        assert!(!registry.remove(&token).await);
        assert!(matches!(registry.get(&token).await, Err(ServiceError::SessionNotFound)));
    }

    #[tokio::test]
    async fn sessions_are_isolated() {
        let registry = SessionRegistry::new();
        let a = registry.insert(session("a")).await;
        let b = registry.insert(session("b")).await;
        a.lock().await.select_qr("QR-A");
        assert!(b.lock().await.selected_qr.is_none());
    }
}

use std::collections::HashMap;
use std::sync::{Arc, RwLock, Weak};

use crate::session::Session;

/// Map from session id to the locally cached `Session`, safe for concurrent
/// lookup and insert/remove. Entries appear on successful creation and leave
/// when a session closes itself. Cloning shares the same map, so one registry
/// can be injected into several client handles.
#[derive(Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, session_id: &str) -> Option<Session> {
        self.sessions.read().unwrap().get(session_id).cloned()
    }

    pub fn contains(&self, session_id: &str) -> bool {
        self.sessions.read().unwrap().contains_key(session_id)
    }

    /// Point-in-time copy of all registered sessions.
    pub fn snapshot(&self) -> Vec<Session> {
        self.sessions.read().unwrap().values().cloned().collect()
    }

    pub(crate) fn insert(&self, session: Session) {
        self.sessions
            .write()
            .unwrap()
            .insert(session.id().to_owned(), session);
    }

    pub(crate) fn remove(&self, session_id: &str) {
        self.sessions.write().unwrap().remove(session_id);
    }

    pub(crate) fn downgrade(&self) -> WeakRegistry {
        WeakRegistry {
            sessions: Arc::downgrade(&self.sessions),
        }
    }
}

/// Back-reference from a `Session` to the registry tracking it. Weak, so the
/// registered sessions do not keep an abandoned registry alive.
#[derive(Clone)]
pub(crate) struct WeakRegistry {
    sessions: Weak<RwLock<HashMap<String, Session>>>,
}

impl WeakRegistry {
    pub(crate) fn upgrade(&self) -> Option<SessionRegistry> {
        self.sessions
            .upgrade()
            .map(|sessions| SessionRegistry { sessions })
    }

    /// No-op when the registry is already gone.
    pub(crate) fn remove(&self, session_id: &str) {
        if let Some(registry) = self.upgrade() {
            registry.remove(session_id);
        }
    }
}

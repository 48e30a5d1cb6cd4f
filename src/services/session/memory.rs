//! In-memory session store (sessions do not survive a restart).
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::services::session::store::{SessionPrincipal, SessionTokenStore};

/// Readable prefix so issued tokens are recognizable in logs and tooling.
const TOKEN_PREFIX: &str = "MMAT-";

#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, Arc<SessionPrincipal>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live sessions (diagnostics and tests).
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

fn mint_token() -> String {
    // UUIDv4 carries 122 bits of entropy; collisions are negligible.
    format!("{}{}", TOKEN_PREFIX, Uuid::new_v4())
}

#[async_trait]
impl SessionTokenStore for InMemorySessionStore {
    async fn create(&self, principal: SessionPrincipal) -> String {
        let token = mint_token();
        let mut sessions = self.sessions.write().await;
        sessions.insert(token.clone(), Arc::new(principal));
        token
    }

    async fn find(&self, token: &str) -> Option<Arc<SessionPrincipal>> {
        let sessions = self.sessions.read().await;
        sessions.get(token).cloned()
    }

    async fn revoke(&self, token: &str) {
        let mut sessions = self.sessions.write().await;
        sessions.remove(token);
    }
}

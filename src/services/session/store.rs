//! Session identity and the token store interface.
use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Capabilities a session can be granted.
///
/// Sessions are currently issued with an empty set; anything beyond
/// "authenticated or not" is decided by the endpoint, not the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Read,
    Write,
}

/// The identity bound to one issued session token.
///
/// Immutable once created. The store owns the canonical copy and hands it
/// out as `Arc<SessionPrincipal>`; nothing else persists it.
#[derive(Debug, Clone)]
pub struct SessionPrincipal {
    subject: String,
    obp_token: String,
    capabilities: HashSet<Capability>,
    created_at: DateTime<Utc>,
}

impl SessionPrincipal {
    pub fn new(subject: impl Into<String>, obp_token: impl Into<String>) -> Self {
        Self::with_capabilities(subject, obp_token, HashSet::new())
    }

    pub fn with_capabilities(
        subject: impl Into<String>,
        obp_token: impl Into<String>,
        capabilities: HashSet<Capability>,
    ) -> Self {
        Self {
            subject: subject.into(),
            obp_token: obp_token.into(),
            capabilities,
            created_at: Utc::now(),
        }
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// The DirectLogin token replayed to OBP for calls made as this user.
    pub fn obp_token(&self) -> &str {
        &self.obp_token
    }

    pub fn has_capability(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Registry mapping opaque bearer tokens to session identities.
///
/// Lookups must be safe under concurrent mutation and a `create` must be
/// visible to `find` as soon as it returns. None of the operations fail;
/// absence is the only negative outcome.
#[async_trait]
pub trait SessionTokenStore: Send + Sync {
    /// Store the principal and return the newly minted opaque token.
    async fn create(&self, principal: SessionPrincipal) -> String;

    /// Pure lookup. A revoked token and one that never existed are
    /// indistinguishable.
    async fn find(&self, token: &str) -> Option<Arc<SessionPrincipal>>;

    /// Idempotent removal; revoking an unknown token is a no-op.
    async fn revoke(&self, token: &str);
}

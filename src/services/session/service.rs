//! Session lifecycle: login against OBP, issue a local token, revoke it.
use std::sync::Arc;

use tracing::info;

use crate::services::obp::error::ObpError;
use crate::services::obp::gateway::ObpGateway;
use crate::services::session::store::{SessionPrincipal, SessionTokenStore};

/// Orchestrates session issuance and revocation.
///
/// - ObpGateway is responsible for the upstream DirectLogin call.
/// - SessionTokenStore is responsible for the local token mapping.
pub struct SessionService {
    obp: Arc<ObpGateway>,
    sessions: Arc<dyn SessionTokenStore>,
}

/// Service-level return type to keep handlers thin.
#[derive(Clone, Debug)]
pub struct IssuedSession {
    pub token: String,
    pub token_type: &'static str,
}

impl SessionService {
    pub fn new(obp: Arc<ObpGateway>, sessions: Arc<dyn SessionTokenStore>) -> Self {
        Self { obp, sessions }
    }

    /// Authenticate the user against OBP and issue a local session token.
    ///
    /// No session entry is created unless the upstream login succeeded;
    /// both failure classes propagate unchanged for the handler to map
    /// (credentials rejected → 401, upstream unreachable → 503).
    pub async fn login(&self, username: &str, password: &str) -> Result<IssuedSession, ObpError> {
        let obp_token = self.obp.login(username, password).await?;

        let token = self
            .sessions
            .create(SessionPrincipal::new(username, obp_token))
            .await;

        info!(username = %username, "session created");

        Ok(IssuedSession {
            token,
            token_type: "Bearer",
        })
    }

    /// Revoke a session token. Always succeeds from the caller's
    /// perspective; revoking an unknown token is a no-op.
    pub async fn logout(&self, token: &str) {
        self.sessions.revoke(token).await;
        info!("session revoked");
    }
}

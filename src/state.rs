/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::services::obp::auth::ServiceAuthenticator;
use crate::services::obp::gateway::ObpGateway;
use crate::services::session::service::SessionService;
use crate::services::session::store::SessionTokenStore;

#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<dyn SessionTokenStore>,
    pub obp: Arc<ObpGateway>,
    pub session_service: Arc<SessionService>,
    pub service_auth: Arc<ServiceAuthenticator>,
}

impl AppState {
    pub fn new(
        sessions: Arc<dyn SessionTokenStore>,
        obp: Arc<ObpGateway>,
        session_service: Arc<SessionService>,
        service_auth: Arc<ServiceAuthenticator>,
    ) -> Self {
        Self {
            sessions,
            obp,
            session_service,
            service_auth,
        }
    }
}

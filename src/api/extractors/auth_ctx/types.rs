use std::sync::Arc;

use crate::services::session::store::SessionPrincipal;

/// The resolved caller identity for one request.
///
/// Bound to request extensions by the bearer middleware; cheap to clone.
#[derive(Clone, Debug)]
pub struct AuthCtx {
    principal: Arc<SessionPrincipal>,
}

impl AuthCtx {
    pub fn new(principal: Arc<SessionPrincipal>) -> Self {
        Self { principal }
    }

    pub fn subject(&self) -> &str {
        self.principal.subject()
    }

    /// The upstream token to attach to OBP calls made as this caller.
    pub fn obp_token(&self) -> &str {
        self.principal.obp_token()
    }

    pub fn principal(&self) -> &SessionPrincipal {
        &self.principal
    }
}

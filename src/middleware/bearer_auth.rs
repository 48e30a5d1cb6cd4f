//! Bearer トークンの解決 (ヘッダ抽出 → store 照合 → AuthCtx を extensions に載せる)
//!
//! This middleware is a resolver, not a gatekeeper: absent, malformed or
//! unknown tokens leave the request anonymous and the chain continues.
//! Whether anonymous is acceptable is each handler's decision (via the
//! AuthCtx extractor).
use axum::{
    Router,
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::api::extractors::AuthCtx;
use crate::state::AppState;

/// Attach the session-resolving middleware to a router.
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、
    // `from_fn_with_state` で明示的に state を渡す
    router.layer(middleware::from_fn_with_state(state, resolve_session))
}

async fn resolve_session(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    // Re-entrant filter chains: keep an already-bound identity untouched.
    if req.extensions().get::<AuthCtx>().is_none() {
        let token = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(extract_bearer_token);

        if let Some(token) = token {
            if let Some(principal) = state.sessions.find(token).await {
                req.extensions_mut().insert(AuthCtx::new(principal));
            }
        }
    }

    next.run(req).await
}

/// Pull the token out of an `Authorization: Bearer <token>` value.
///
/// The scheme comparison is case-insensitive; an empty token counts as
/// absent.
pub fn extract_bearer_token(header: &str) -> Option<&str> {
    const SCHEME: &str = "Bearer ";

    if header.len() < SCHEME.len() || !header[..SCHEME.len()].eq_ignore_ascii_case(SCHEME) {
        return None;
    }

    let token = header[SCHEME.len()..].trim();
    if token.is_empty() { None } else { Some(token) }
}

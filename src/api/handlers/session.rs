use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use tracing::{error, warn};

use crate::api::dto::session::{LoginRequest, SessionResponse, SessionStatusResponse};
use crate::api::extractors::AuthCtxExtractor;
use crate::api::links::{Link, Links};
use crate::error::AppError;
use crate::middleware::bearer_auth::extract_bearer_token;
use crate::services::obp::error::ObpError;
use crate::state::AppState;

/// POST /session: authenticate against OBP and issue a local token.
pub async fn create_session(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    if req.username.trim().is_empty() || req.password.is_empty() {
        return Err(AppError::InvalidRequest(
            "username and password must not be blank".to_string(),
        ));
    }

    let issued = match state.session_service.login(&req.username, &req.password).await {
        Ok(issued) => issued,
        Err(ObpError::AuthenticationFailed) => {
            warn!(username = %req.username, "authentication rejected by upstream");
            return Err(AppError::Unauthorized);
        }
        Err(e) => {
            error!(username = %req.username, error = %e, "upstream login failed");
            return Err(AppError::UpstreamUnavailable);
        }
    };

    // After login the primary next action is the profile; guide the agent
    // to navigate rather than act.
    let links = Links::new()
        .add(
            "me",
            Link::new("/users/me").title("Your user profile and available actions"),
        )
        .add("self", Link::new("/session"))
        .add(
            "about",
            Link::new("/docs/session")
                .media_type("text/markdown")
                .title("Session semantics (MUST READ)"),
        )
        .add("root", Link::new("/").title("Return to API root"));

    Ok((
        StatusCode::CREATED,
        // The body carries a credential; keep it out of shared caches.
        [(header::CACHE_CONTROL, "no-store, private")],
        Json(SessionResponse::create(issued.token, links)),
    ))
}

/// GET /session: session metadata for an authenticated caller.
pub async fn get_session(
    AuthCtxExtractor(_auth): AuthCtxExtractor,
) -> Json<SessionStatusResponse> {
    let links = Links::new()
        .add("self", Link::new("/session"))
        .add(
            "about",
            Link::new("/docs/session")
                .media_type("text/markdown")
                .title("Session semantics (MUST READ)"),
        )
        .add("me", Link::new("/users/me"))
        .add("root", Link::new("/"));

    Json(SessionStatusResponse {
        token_type: "Bearer",
        links,
    })
}

/// DELETE /session: revoke the presented token.
///
/// Deliberately unauthenticated and idempotent: a second DELETE with an
/// already-revoked token still answers 204.
pub async fn delete_session(State(state): State<AppState>, headers: HeaderMap) -> StatusCode {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(extract_bearer_token);

    if let Some(token) = token {
        state.session_service.logout(token).await;
    }

    StatusCode::NO_CONTENT
}

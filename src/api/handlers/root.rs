use axum::Json;

use crate::api::dto::root::RootResponse;
use crate::api::extractors::MaybeAuthCtx;
use crate::api::links::{Link, Links};

const AGENT_BOOTSTRAP: &str = "Before taking any action, you MUST fetch and obey the resource \
     referenced by _links.profile and MUST NOT navigate or act until it has been read. \
     This API is a hypermedia API: all valid navigation is listed in _links.";

/// GET /, the handshake for agent protocol bootstrapping.
///
/// The link set depends on whether the request resolved to a session.
pub async fn get_root(MaybeAuthCtx(auth): MaybeAuthCtx) -> Json<RootResponse> {
    let mut links = Links::new()
        .add("self", Link::new("/"))
        .add(
            "profile",
            Link::new("/AGENTS.md")
                .media_type("text/markdown")
                .title("Agent Instructions - MUST READ"),
        )
        .add(
            "login",
            Link::new("/session").title("POST credentials here to open a session"),
        );

    if auth.is_some() {
        links = links
            .add(
                "me",
                Link::new("/users/me").title("Your user profile and available actions"),
            )
            .add("session", Link::new("/session").title("Current session"));
    }

    Json(RootResponse {
        agent_bootstrap: AGENT_BOOTSTRAP,
        links,
    })
}

use axum::{
    Router,
    routing::{get, post},
};

use crate::api::handlers::{account, docs, root, session, transaction, user};
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(root::get_root))
        .route("/AGENTS.md", get(docs::agents_md))
        .route("/docs/session", get(docs::session_docs))
        .route(
            "/session",
            post(session::create_session)
                .get(session::get_session)
                .delete(session::delete_session),
        )
        .route("/users/me", get(user::current_user))
        .route("/accounts", get(account::list_accounts))
        .route(
            "/accounts/{account_id}/transactions",
            get(transaction::list_transactions),
        )
        .with_state(state)
}

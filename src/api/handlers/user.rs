use std::collections::HashSet;

use axum::Json;
use axum::extract::State;

use crate::api::dto::user::UserResponse;
use crate::api::extractors::AuthCtxExtractor;
use crate::api::links::{Link, Links};
use crate::error::AppError;
use crate::services::obp::transport::CredentialSource;
use crate::state::AppState;

/// GET /users/me: profile enriched with account and bank counts.
pub async fn current_user(
    State(state): State<AppState>,
    AuthCtxExtractor(auth): AuthCtxExtractor,
) -> Result<Json<UserResponse>, AppError> {
    let credential = CredentialSource::User(auth.obp_token());

    let user = state
        .obp
        .current_user(credential)
        .await
        .map_err(AppError::upstream)?;
    let accounts = state
        .obp
        .accounts(credential)
        .await
        .map_err(AppError::upstream)?;

    let bank_count = accounts
        .iter()
        .map(|a| a.bank_id.as_str())
        .collect::<HashSet<_>>()
        .len();

    let links = Links::new()
        .add("self", Link::new("/users/me"))
        .add("root", Link::new("/"))
        .add("accounts", Link::new("/accounts").title("All my accounts"));

    Ok(Json(UserResponse {
        username: user.username,
        email: user.email,
        account_count: accounts.len(),
        bank_count,
        links,
    }))
}

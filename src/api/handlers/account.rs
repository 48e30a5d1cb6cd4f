use std::collections::HashMap;

use axum::Json;
use axum::extract::State;
use tracing::warn;

use crate::api::dto::account::{AccountCollectionResponse, AccountResponse};
use crate::api::extractors::AuthCtxExtractor;
use crate::api::links::{Link, Links};
use crate::error::AppError;
use crate::services::obp::transport::CredentialSource;
use crate::state::AppState;

/// GET /accounts: the caller's accounts joined with bank names and
/// (best-effort) balances.
pub async fn list_accounts(
    State(state): State<AppState>,
    AuthCtxExtractor(auth): AuthCtxExtractor,
) -> Result<Json<AccountCollectionResponse>, AppError> {
    let credential = CredentialSource::User(auth.obp_token());

    let accounts = state
        .obp
        .accounts(credential)
        .await
        .map_err(AppError::upstream)?;
    let banks = state
        .obp
        .banks(credential)
        .await
        .map_err(AppError::upstream)?;

    let bank_names: HashMap<&str, &str> = banks
        .iter()
        .map(|bank| (bank.id.as_str(), bank.display_name()))
        .collect();

    let mut out = Vec::with_capacity(accounts.len());
    for account in &accounts {
        let bank_name = bank_names
            .get(account.bank_id.as_str())
            .copied()
            .unwrap_or(account.bank_id.as_str())
            .to_string();

        // Balance enrichment must not take the whole listing down with it.
        let balance = match state
            .obp
            .account_details(credential, &account.bank_id, &account.id)
            .await
        {
            Ok(details) => details.balance,
            Err(e) => {
                warn!(
                    bank_id = %account.bank_id,
                    account_id = %account.id,
                    error = %e,
                    "failed to fetch balance, omitting it"
                );
                None
            }
        };
        let (currency, amount) = match balance {
            Some(b) => (Some(b.currency), Some(b.amount)),
            None => (None, None),
        };

        let links = Links::new()
            .add(
                "self",
                Link::new(format!("/accounts/{}", account.id)).title("Account details"),
            )
            .add(
                "bank",
                Link::new(format!("/banks/{}", account.bank_id)).title(bank_name.clone()),
            )
            .add(
                "transactions",
                Link::new(format!("/accounts/{}/transactions", account.id)).title("Transactions"),
            );

        out.push(AccountResponse {
            id: account.id.clone(),
            account_type: account.account_type.clone(),
            bank_id: account.bank_id.clone(),
            bank_name,
            iban: account.iban().map(str::to_string),
            currency,
            amount,
            links,
        });
    }

    let links = Links::new()
        .add("self", Link::new("/accounts"))
        .add("root", Link::new("/").title("API root"))
        .add("me", Link::new("/users/me").title("My profile"));

    Ok(Json(AccountCollectionResponse {
        account_count: out.len(),
        accounts: out,
        links,
    }))
}

use axum::Json;
use axum::extract::{Path, State};
use tracing::warn;

use crate::api::dto::transaction::{TransactionCollectionResponse, TransactionResponse};
use crate::api::extractors::AuthCtxExtractor;
use crate::api::links::{Link, Links};
use crate::error::AppError;
use crate::services::obp::transport::CredentialSource;
use crate::state::AppState;

/// GET /accounts/{account_id}/transactions
///
/// The bank id is resolved from the caller's own account list; an
/// account id outside that list is a 404, not an upstream error.
pub async fn list_transactions(
    State(state): State<AppState>,
    AuthCtxExtractor(auth): AuthCtxExtractor,
    Path(account_id): Path<String>,
) -> Result<Json<TransactionCollectionResponse>, AppError> {
    let credential = CredentialSource::User(auth.obp_token());

    let accounts = state
        .obp
        .accounts(credential)
        .await
        .map_err(AppError::upstream)?;

    let Some(account) = accounts.iter().find(|a| a.id == account_id) else {
        warn!(account_id = %account_id, subject = %auth.subject(), "account not in caller's list");
        return Err(AppError::NotFound);
    };

    let transactions = state
        .obp
        .transactions(credential, &account.bank_id, &account_id)
        .await
        .map_err(AppError::upstream)?;

    let out: Vec<TransactionResponse> = transactions
        .into_iter()
        .map(|txn| {
            let (amount, currency) = match txn.details.value {
                Some(value) => (Some(value.amount), Some(value.currency)),
                None => (None, None),
            };

            let links = Links::new()
                .add(
                    "self",
                    Link::new(format!("/accounts/{account_id}/transactions/{}", txn.id))
                        .title("Transaction details"),
                )
                .add(
                    "account",
                    Link::new(format!("/accounts/{account_id}")).title("Account"),
                );

            TransactionResponse {
                posted: txn.details.posted,
                description: txn.details.description,
                amount,
                currency,
                new_balance: txn.details.new_balance.map(|b| b.amount),
                links,
            }
        })
        .collect();

    let links = Links::new()
        .add(
            "self",
            Link::new(format!("/accounts/{account_id}/transactions")).title("Account transactions"),
        )
        .add(
            "account",
            Link::new(format!("/accounts/{account_id}")).title("Back to account"),
        )
        .add("root", Link::new("/").title("API root"));

    Ok(Json(TransactionCollectionResponse {
        transaction_count: out.len(),
        transactions: out,
        links,
    }))
}

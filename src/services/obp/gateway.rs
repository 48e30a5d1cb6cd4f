//! Typed operations against the OBP API.
//!
//! The gateway is stateless and credential-agnostic: every operation
//! takes the credential explicitly, so the same code serves user-scoped
//! and service-scoped calls.
use std::sync::Arc;

use tracing::debug;

use crate::services::obp::error::ObpResult;
use crate::services::obp::transport::{CredentialSource, ObpTransport};
use crate::services::obp::types::{
    AccountsEnvelope, BanksEnvelope, ObpAccount, ObpAccountDetails, ObpBank, ObpTransaction,
    TransactionsEnvelope, UserDetails,
};

pub struct ObpGateway {
    transport: Arc<ObpTransport>,
}

impl ObpGateway {
    pub fn new(transport: Arc<ObpTransport>) -> Self {
        Self { transport }
    }

    /// DirectLogin with end-user credentials; returns the upstream token.
    pub async fn login(&self, username: &str, password: &str) -> ObpResult<String> {
        self.transport.direct_login(username, password).await
    }

    pub async fn current_user(&self, credential: CredentialSource<'_>) -> ObpResult<UserDetails> {
        let user: UserDetails = self.transport.get_json("/users/current", credential).await?;
        debug!(username = %user.username, "fetched current user");
        Ok(user)
    }

    pub async fn accounts(&self, credential: CredentialSource<'_>) -> ObpResult<Vec<ObpAccount>> {
        let envelope: AccountsEnvelope = self.transport.get_json("/my/accounts", credential).await?;
        debug!(count = envelope.accounts.len(), "fetched accounts");
        Ok(envelope.accounts)
    }

    pub async fn banks(&self, credential: CredentialSource<'_>) -> ObpResult<Vec<ObpBank>> {
        let envelope: BanksEnvelope = self.transport.get_json("/banks", credential).await?;
        debug!(count = envelope.banks.len(), "fetched banks");
        Ok(envelope.banks)
    }

    /// Account detail including balance.
    ///
    /// Best-effort for aggregate callers: a failure here must not abort a
    /// listing that would otherwise succeed.
    pub async fn account_details(
        &self,
        credential: CredentialSource<'_>,
        bank_id: &str,
        account_id: &str,
    ) -> ObpResult<ObpAccountDetails> {
        let path = format!("/banks/{bank_id}/accounts/{account_id}/owner/account");
        let details: ObpAccountDetails = self.transport.get_json(&path, credential).await?;
        debug!(bank_id = %bank_id, account_id = %account_id, "fetched account details");
        Ok(details)
    }

    pub async fn transactions(
        &self,
        credential: CredentialSource<'_>,
        bank_id: &str,
        account_id: &str,
    ) -> ObpResult<Vec<ObpTransaction>> {
        let path = format!("/banks/{bank_id}/accounts/{account_id}/owner/transactions");
        let envelope: TransactionsEnvelope = self.transport.get_json(&path, credential).await?;
        debug!(
            count = envelope.transactions.len(),
            bank_id = %bank_id,
            account_id = %account_id,
            "fetched transactions"
        );
        Ok(envelope.transactions)
    }
}

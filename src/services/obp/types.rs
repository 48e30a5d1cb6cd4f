//! Wire structs for the OBP responses we consume.
//!
//! Field names mirror OBP's snake_case JSON. Optional fields stay
//! optional here; presentation decides what to do about absence.
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct DirectLoginResponse {
    pub token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserDetails {
    pub user_id: String,
    pub email: Option<String>,
    pub username: String,
    pub provider_id: Option<String>,
    pub provider: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccountsEnvelope {
    pub accounts: Vec<ObpAccount>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObpAccount {
    pub id: String,
    pub label: Option<String>,
    pub bank_id: String,
    pub account_type: Option<String>,
    #[serde(default)]
    pub account_routings: Vec<AccountRouting>,
}

impl ObpAccount {
    /// First IBAN routing, if the account carries one.
    pub fn iban(&self) -> Option<&str> {
        self.account_routings
            .iter()
            .find(|r| r.scheme.eq_ignore_ascii_case("IBAN"))
            .map(|r| r.address.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccountRouting {
    pub scheme: String,
    pub address: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BanksEnvelope {
    pub banks: Vec<ObpBank>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObpBank {
    pub id: String,
    pub short_name: Option<String>,
    pub full_name: Option<String>,
    pub logo: Option<String>,
    pub website: Option<String>,
}

impl ObpBank {
    /// Display name with sensible fallbacks (short name, full name, id).
    pub fn display_name(&self) -> &str {
        self.short_name
            .as_deref()
            .or(self.full_name.as_deref())
            .unwrap_or(&self.id)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObpAccountDetails {
    pub id: String,
    pub label: Option<String>,
    pub number: Option<String>,
    pub product_code: Option<String>,
    pub balance: Option<Balance>,
    pub bank_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Balance {
    pub currency: String,
    pub amount: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransactionsEnvelope {
    pub transactions: Vec<ObpTransaction>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObpTransaction {
    pub id: String,
    pub details: TransactionDetails,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransactionDetails {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub description: Option<String>,
    pub posted: Option<String>,
    pub completed: Option<String>,
    pub new_balance: Option<Balance>,
    pub value: Option<Balance>,
}

use serde::Serialize;

use crate::api::links::Links;

#[derive(Debug, Clone, Serialize)]
pub struct AccountResponse {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_type: Option<String>,
    pub bank_id: String,
    pub bank_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iban: Option<String>,
    /// Balance fields are best-effort; they are omitted when the detail
    /// call for this account failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    #[serde(rename = "_links")]
    pub links: Links,
}

#[derive(Debug, Clone, Serialize)]
pub struct AccountCollectionResponse {
    pub account_count: usize,
    pub accounts: Vec<AccountResponse>,
    #[serde(rename = "_links")]
    pub links: Links,
}

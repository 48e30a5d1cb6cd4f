use serde::Serialize;

use crate::api::links::Links;

#[derive(Debug, Clone, Serialize)]
pub struct TransactionResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posted: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_balance: Option<String>,
    #[serde(rename = "_links")]
    pub links: Links,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransactionCollectionResponse {
    pub transaction_count: usize,
    pub transactions: Vec<TransactionResponse>,
    #[serde(rename = "_links")]
    pub links: Links,
}

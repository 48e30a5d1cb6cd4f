use serde::Serialize;

use crate::api::links::Links;

#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub account_count: usize,
    pub bank_count: usize,
    #[serde(rename = "_links")]
    pub links: Links,
}

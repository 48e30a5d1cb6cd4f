use serde::{Deserialize, Serialize};

use crate::api::links::Links;

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Issued-session response body. Contains a credential, so it is served
/// with `Cache-Control: no-store, private`.
#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    /// Always "Bearer".
    pub token_type: &'static str,
    pub access_token: String,
    #[serde(rename = "_links")]
    pub links: Links,
}

impl SessionResponse {
    pub fn create(access_token: String, links: Links) -> Self {
        Self {
            token_type: "Bearer",
            access_token,
            links,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionStatusResponse {
    pub token_type: &'static str,
    #[serde(rename = "_links")]
    pub links: Links,
}

//! Outgoing OBP HTTP calls with DirectLogin credential injection.
//!
//! The transport owns the `reqwest` client (fixed connect/read timeouts
//! from configuration) and sets the `directlogin` header before every
//! dispatch. It never retries; a failed call surfaces as-is.
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::ObpConfig;
use crate::services::obp::auth::ServiceAuthenticator;
use crate::services::obp::error::{ObpError, ObpResult};
use crate::services::obp::types::DirectLoginResponse;

/// OBP's single-value authentication header.
pub const DIRECT_LOGIN_HEADER: &str = "directlogin";

/// Which credential an outgoing call is made with.
///
/// Ephemeral, one per call; never stored.
#[derive(Clone, Copy)]
pub enum CredentialSource<'a> {
    /// DirectLogin token stored in the caller's session.
    User(&'a str),
    /// Application-level token, resolved (and cached) on demand.
    Service(&'a ServiceAuthenticator),
}

pub struct ObpTransport {
    http: reqwest::Client,
    base_url: String,
    api_version: String,
    consumer_key: String,
}

impl ObpTransport {
    pub fn new(config: &ObpConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.read_timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            api_version: config.api_version.clone(),
            consumer_key: config.auth.consumer_key.clone(),
        })
    }

    /// GET a versioned API path (`/obp/{version}{path}`) and decode the body.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        credential: CredentialSource<'_>,
    ) -> ObpResult<T> {
        let header = self.credential_header(credential).await?;
        let url = format!("{}/obp/{}{}", self.base_url, self.api_version, path);

        debug!(path = %path, "GET upstream");

        let response = self
            .http
            .get(&url)
            .header(DIRECT_LOGIN_HEADER, header)
            .send()
            .await
            .map_err(|e| ObpError::Unavailable(format!("request to {path} failed: {e}")))?;

        decode(path, response).await
    }

    /// POST the DirectLogin call and return the issued token.
    ///
    /// This is the one call authenticated with the username/password/
    /// consumer-key form of the header rather than `token=`.
    pub async fn direct_login(&self, username: &str, password: &str) -> ObpResult<String> {
        debug!(username = %username, "attempting DirectLogin");

        let response = self
            .http
            .post(format!("{}/my/logins/direct", self.base_url))
            .header(
                DIRECT_LOGIN_HEADER,
                login_header(username, password, &self.consumer_key),
            )
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body("{}")
            .send()
            .await
            .map_err(|e| ObpError::Unavailable(format!("DirectLogin request failed: {e}")))?;

        let login: DirectLoginResponse = decode("/my/logins/direct", response).await?;
        Ok(login.token)
    }

    async fn credential_header(&self, credential: CredentialSource<'_>) -> ObpResult<String> {
        match credential {
            CredentialSource::User(token) => Ok(format!("token={token}")),
            CredentialSource::Service(auth) => Ok(format!("token={}", auth.service_token().await?)),
        }
    }
}

fn login_header(username: &str, password: &str, consumer_key: &str) -> String {
    format!("username={username}, password={password}, consumer_key={consumer_key}")
}

async fn decode<T: DeserializeOwned>(path: &str, response: reqwest::Response) -> ObpResult<T> {
    let status = response.status();

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(ObpError::AuthenticationFailed);
    }
    if !status.is_success() {
        return Err(ObpError::Unavailable(format!(
            "upstream returned {status} for {path}"
        )));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| ObpError::Unavailable(format!("malformed upstream body for {path}: {e}")))
}

//! Startup connectivity check against OBP using the service credential.
use tracing::{error, info};

use crate::services::obp::auth::ServiceAuthenticator;
use crate::services::obp::error::{ObpError, ObpResult};
use crate::services::obp::gateway::ObpGateway;
use crate::services::obp::transport::CredentialSource;

/// Authenticate as the application and fetch `users/current`.
///
/// A credential rejection also clears the cached service token so a later
/// attempt starts from a clean slate.
pub async fn verify_upstream(
    service_auth: &ServiceAuthenticator,
    gateway: &ObpGateway,
) -> ObpResult<()> {
    info!("verifying upstream connectivity");

    match gateway
        .current_user(CredentialSource::Service(service_auth))
        .await
    {
        Ok(user) => {
            info!(
                user_id = %user.user_id,
                username = %user.username,
                "upstream connectivity verified"
            );
            Ok(())
        }
        Err(ObpError::AuthenticationFailed) => {
            error!("upstream rejected the application credentials");
            service_auth.invalidate().await;
            Err(ObpError::AuthenticationFailed)
        }
        Err(e) => {
            error!(error = %e, "upstream connectivity check failed");
            Err(e)
        }
    }
}

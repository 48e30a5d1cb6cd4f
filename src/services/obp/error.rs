//! Upstream (OBP) error taxonomy.
//!
//! Kept independent from `AppError` so callers decide how each failure
//! surfaces: a rejected login is the caller's 401, a rejected stored
//! credential on a resource call is our 503.
use thiserror::Error;

pub type ObpResult<T> = Result<T, ObpError>;

// Clone: a single-flight login shares one outcome with every waiter.
#[derive(Debug, Clone, Error)]
pub enum ObpError {
    /// OBP rejected the presented credentials (401/403).
    #[error("upstream rejected the credentials")]
    AuthenticationFailed,

    /// Network failure, unexpected upstream status, or malformed body.
    /// Never retried inside the core.
    #[error("upstream unavailable: {0}")]
    Unavailable(String),
}

//! Application-level OBP credential cache.
//!
//! One process-wide token, fetched lazily with the fixed application
//! credentials and reused until `invalidate()` clears it. Cold-cache
//! callers are coalesced into a single upstream login (single-flight):
//! the first caller drives the DirectLogin, everyone else waits on its
//! outcome and receives the same token or the same failure. A failed
//! fetch leaves the cache empty so the next call retries.
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, watch};
use tracing::{info, warn};

use crate::config::ObpAuthConfig;
use crate::services::obp::error::{ObpError, ObpResult};
use crate::services::obp::transport::ObpTransport;

/// The cached application credential.
#[derive(Debug, Clone)]
pub struct ServiceCredential {
    pub token: String,
    pub obtained_at: DateTime<Utc>,
}

type FetchResult = Result<String, ObpError>;

/// An in-flight login other callers can wait on. The generation guards
/// against a stale flight resolving a slot it no longer owns.
struct Flight {
    generation: u64,
    rx: watch::Receiver<Option<FetchResult>>,
}

enum Slot {
    Empty,
    Fetching(Flight),
    Ready(ServiceCredential),
}

struct Inner {
    slot: Slot,
    generation: u64,
}

pub struct ServiceAuthenticator {
    transport: Arc<ObpTransport>,
    auth: ObpAuthConfig,
    inner: Mutex<Inner>,
}

impl ServiceAuthenticator {
    pub fn new(transport: Arc<ObpTransport>, auth: ObpAuthConfig) -> Self {
        Self {
            transport,
            auth,
            inner: Mutex::new(Inner {
                slot: Slot::Empty,
                generation: 0,
            }),
        }
    }

    /// Return the cached service token, authenticating first if needed.
    pub async fn service_token(&self) -> ObpResult<String> {
        loop {
            let (mut rx, generation) = {
                let mut inner = self.inner.lock().await;
                match &inner.slot {
                    Slot::Ready(credential) => return Ok(credential.token.clone()),
                    Slot::Fetching(flight) => (flight.rx.clone(), flight.generation),
                    Slot::Empty => {
                        inner.generation += 1;
                        let generation = inner.generation;
                        let (tx, rx) = watch::channel(None);
                        inner.slot = Slot::Fetching(Flight { generation, rx });
                        drop(inner);
                        return self.lead_fetch(generation, tx).await;
                    }
                }
            };

            // Another caller is already logging in; wait for its outcome.
            let outcome = match rx.changed().await {
                Ok(()) => rx.borrow().clone(),
                // Sender dropped without a value: the leader was cancelled.
                Err(_) => None,
            };

            match outcome {
                Some(result) => return result,
                None => {
                    // Clear the abandoned flight (unless a newer one has
                    // taken the slot) and try again from the top.
                    let mut inner = self.inner.lock().await;
                    let abandoned = matches!(
                        &inner.slot,
                        Slot::Fetching(flight) if flight.generation == generation
                    );
                    if abandoned {
                        inner.slot = Slot::Empty;
                    }
                }
            }
        }
    }

    async fn lead_fetch(
        &self,
        generation: u64,
        tx: watch::Sender<Option<FetchResult>>,
    ) -> ObpResult<String> {
        let result = self
            .transport
            .direct_login(&self.auth.username, &self.auth.password)
            .await;

        {
            let mut inner = self.inner.lock().await;
            // Only the flight that owns the slot may resolve it.
            let owns_slot = matches!(
                &inner.slot,
                Slot::Fetching(flight) if flight.generation == generation
            );
            if owns_slot {
                inner.slot = match &result {
                    Ok(token) => {
                        info!("service credential obtained");
                        Slot::Ready(ServiceCredential {
                            token: token.clone(),
                            obtained_at: Utc::now(),
                        })
                    }
                    Err(e) => {
                        warn!(error = %e, "service-level DirectLogin failed");
                        Slot::Empty
                    }
                };
            }
        }

        // Wake the waiters with the shared outcome; nobody listening is fine.
        let _ = tx.send(Some(result.clone()));

        result
    }

    /// Drop the cached credential; the next `service_token` re-authenticates.
    /// A login already in flight is left to finish (its result simply
    /// won't be cached if it loses the slot).
    pub async fn invalidate(&self) {
        let mut inner = self.inner.lock().await;
        if matches!(inner.slot, Slot::Ready(_)) {
            inner.slot = Slot::Empty;
            info!("service credential invalidated");
        }
    }

    /// When the current credential was obtained, if one is cached.
    pub async fn obtained_at(&self) -> Option<DateTime<Utc>> {
        match &self.inner.lock().await.slot {
            Slot::Ready(credential) => Some(credential.obtained_at),
            _ => None,
        }
    }
}

//! Authenticated session manager.

use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;
use tracing::{debug, error, info, instrument, warn};

use crate::call::{ApiCall, Attempt};
use crate::envelope::EnvelopeUnwrapper;
use crate::error::{AuthError, RefreshFailure, TransportError};
use crate::traits::{CredentialStore, SessionEvents, TokenRefresher, Transport};
use crate::{AccessToken, RefreshToken, RefreshedTokens, Result};

use super::cycle::{Joined, LeaderGuard, RefreshCycle, lock};

/// Wraps a [`Transport`] with credential attachment and expiry recovery.
///
/// Every call is sent with the stored access credential. When the server
/// rejects it with 401 the manager refreshes the credential (at most one
/// refresh in flight, however many calls fail at once) and replays the call
/// exactly once. When recovery is impossible the stored credentials are
/// cleared and the [`SessionEvents`] sink is told to send the user back to
/// login.
///
/// Cheap to clone; clones share the refresh cycle.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use meetroom_core::{ApiCall, CredentialStore, EndpointRefresher, MemoryCredentialStore,
///     SessionManager, TracingEvents, Transport};
///
/// # async fn example(transport: Arc<dyn Transport>) -> Result<(), meetroom_core::Error> {
/// let refresher = Arc::new(EndpointRefresher::new(transport.clone()));
/// let store: Arc<dyn CredentialStore> = Arc::new(MemoryCredentialStore::new());
/// let session = SessionManager::new(transport, refresher, store, Arc::new(TracingEvents));
///
/// let rooms = session.execute(ApiCall::get("/api/rooms/list/")).await?;
/// println!("{rooms}");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct SessionManager {
    inner: Arc<Inner>,
}

struct Inner {
    transport: Arc<dyn Transport>,
    refresher: Arc<dyn TokenRefresher>,
    store: Arc<dyn CredentialStore>,
    events: Arc<dyn SessionEvents>,
    unwrapper: EnvelopeUnwrapper,
    cycle: Mutex<RefreshCycle>,
}

impl SessionManager {
    pub fn new(
        transport: Arc<dyn Transport>,
        refresher: Arc<dyn TokenRefresher>,
        store: Arc<dyn CredentialStore>,
        events: Arc<dyn SessionEvents>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                transport,
                refresher,
                store,
                unwrapper: EnvelopeUnwrapper::new(events.clone()),
                events,
                cycle: Mutex::new(RefreshCycle::default()),
            }),
        }
    }

    /// The credential store this manager reads and writes.
    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.inner.store
    }

    /// The sink receiving user-facing notifications.
    pub fn events(&self) -> &Arc<dyn SessionEvents> {
        &self.inner.events
    }

    /// Returns true while a credential refresh is in flight.
    pub fn is_refreshing(&self) -> bool {
        lock(&self.inner.cycle).is_refreshing()
    }

    /// Number of calls queued behind the in-flight refresh.
    pub fn queued_waiters(&self) -> usize {
        lock(&self.inner.cycle).queued()
    }

    /// Execute an authenticated call and return the envelope's `data`.
    ///
    /// # Errors
    ///
    /// - [`crate::Error::Transport`] / [`crate::Error::Application`] from the envelope stage
    /// - [`AuthError::RefreshFailed`] if the credential refresh failed
    /// - [`AuthError::SessionExpired`] if the session could not be recovered
    #[instrument(skip(self, call), fields(call = %call))]
    pub async fn execute(&self, call: ApiCall) -> Result<serde_json::Value> {
        let mut attempt = Attempt::first(call);
        let mut bearer = self.inner.store.access_token();

        loop {
            let outcome = self
                .inner
                .transport
                .send(attempt.call(), bearer.as_ref())
                .await;

            match outcome {
                Ok(response) if response.is_unauthorized() => {
                    debug!(
                        replay = attempt.already_retried(),
                        "Access credential rejected"
                    );
                    let token = self.recover(&attempt, bearer.as_ref()).await?;
                    attempt = attempt.replay();
                    bearer = Some(token);
                }
                other => return self.inner.unwrapper.unwrap(other),
            }
        }
    }

    /// Execute an authenticated call and decode its `data` into `T`.
    pub async fn execute_as<T: DeserializeOwned>(&self, call: ApiCall) -> Result<T> {
        let data = self.execute(call).await?;
        self.decode(data)
    }

    /// Execute a call that must not carry credentials, such as login.
    ///
    /// No bearer is attached and a 401 is not treated as credential expiry.
    #[instrument(skip(self, call), fields(call = %call))]
    pub async fn execute_public(&self, call: ApiCall) -> Result<serde_json::Value> {
        let outcome = self.inner.transport.send(&call, None).await;
        self.inner.unwrapper.unwrap(outcome)
    }

    /// Like [`execute_public`](Self::execute_public), decoding `data` into `T`.
    pub async fn execute_public_as<T: DeserializeOwned>(&self, call: ApiCall) -> Result<T> {
        let data = self.execute_public(call).await?;
        self.decode(data)
    }

    /// Store a freshly issued credential pair, as after a login.
    pub fn establish(&self, access: AccessToken, refresh: Option<RefreshToken>) -> Result<()> {
        self.inner.store.save(access, refresh)?;
        info!("Session established");
        Ok(())
    }

    /// Drop the stored credentials without notifying the UI.
    pub fn logout(&self) -> Result<()> {
        self.inner.store.clear()?;
        info!("Session cleared");
        Ok(())
    }

    fn decode<T: DeserializeOwned>(&self, data: serde_json::Value) -> Result<T> {
        serde_json::from_value(data).map_err(|e| {
            let err = TransportError::InvalidBody {
                message: format!("unexpected response data: {}", e),
            };
            self.inner.events.network_unreachable(&err.to_string());
            err.into()
        })
    }

    /// Obtain the credential to replay `attempt` with, or end the session.
    async fn recover(&self, attempt: &Attempt, sent_with: Option<&AccessToken>) -> Result<AccessToken> {
        if attempt.already_retried() {
            self.end_session("replayed call was rejected again");
            return Err(AuthError::SessionExpired.into());
        }

        let step = {
            let mut cycle = lock(&self.inner.cycle);
            match self.inner.store.access_token() {
                // A refresh that settled while this call was in flight has
                // already replaced the credential it was sent with.
                Some(current) if sent_with != Some(&current) => Recovery::Replay(current),
                _ => match self.inner.store.refresh_token() {
                    Some(refresh_token) => Recovery::Join(cycle.join(), refresh_token),
                    None => Recovery::NoRefreshToken,
                },
            }
        };

        match step {
            Recovery::Replay(current) => {
                debug!("Credential changed since dispatch; replaying with stored credential");
                Ok(current)
            }
            Recovery::NoRefreshToken => {
                self.end_session("no refresh credential stored");
                Err(AuthError::SessionExpired.into())
            }
            Recovery::Join(Joined::Leader, refresh_token) => self.lead_refresh(&refresh_token).await,
            Recovery::Join(Joined::Waiter { ticket, rx }, _) => {
                debug!(ticket, "Refresh in flight; queued");
                match rx.await {
                    Ok(Ok(token)) => Ok(token),
                    Ok(Err(failure)) => Err(failure.into()),
                    Err(_) => Err(RefreshFailure::new("refresh cycle ended without an outcome").into()),
                }
            }
        }
    }

    async fn lead_refresh(&self, refresh_token: &RefreshToken) -> Result<AccessToken> {
        let guard = LeaderGuard::new(&self.inner.cycle);
        info!("Refreshing access credential");

        let outcome = match self.inner.refresher.refresh(refresh_token).await {
            Ok(tokens) => self.persist(tokens),
            Err(failure) => Err(failure),
        };

        match outcome {
            Ok(token) => {
                let released = guard.settle(&Ok(token.clone()));
                debug!(released, "Access credential refreshed");
                Ok(token)
            }
            Err(failure) => {
                warn!(reason = %failure, "Credential refresh failed");
                self.clear_credentials();
                let released = guard.settle(&Err(failure.clone()));
                debug!(released, "Failing queued calls");
                self.notify_expired();
                Err(failure.into())
            }
        }
    }

    fn persist(&self, tokens: RefreshedTokens) -> std::result::Result<AccessToken, RefreshFailure> {
        let RefreshedTokens { access, refresh } = tokens;
        let stored = match refresh {
            Some(refresh) => self.inner.store.save(access.clone(), Some(refresh)),
            None => self.inner.store.set_access_token(access.clone()),
        };
        stored.map_err(|e| RefreshFailure::new(format!("could not persist refreshed credential: {}", e)))?;
        Ok(access)
    }

    fn end_session(&self, reason: &str) {
        warn!(reason, "Session expired");
        self.clear_credentials();
        self.notify_expired();
    }

    fn clear_credentials(&self) {
        if let Err(e) = self.inner.store.clear() {
            error!(error = %e, "Failed to clear stored credentials");
        }
    }

    fn notify_expired(&self) {
        self.inner.events.session_expired();
        self.inner.events.redirect_to_login();
    }
}

/// Next step for a call whose credential was rejected.
enum Recovery {
    Replay(AccessToken),
    Join(Joined, RefreshToken),
    NoRefreshToken,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("refreshing", &self.is_refreshing())
            .field("queued_waiters", &self.queued_waiters())
            .finish_non_exhaustive()
    }
}

//! Reservation API client.

use std::sync::Arc;

use tracing::{info, instrument};

use meetroom_core::error::InvalidInputError;
use meetroom_core::{
    AccessToken, ApiCall, CredentialStore, Credentials, EndpointRefresher, Error, RefreshToken,
    Result, SessionEvents, SessionManager, TimeSlot, Transport,
};

use crate::config::ClientConfig;
use crate::endpoints::{self, CheckRequest, CreateRequest, LoginRequest, LoginResponse};
use crate::models::{AvailableRoom, Reservation, Room};
use crate::transport::HttpTransport;

/// Typed client for the meeting room reservation API.
///
/// All authenticated operations go through a [`SessionManager`], so an
/// expired access credential is refreshed and the operation replayed
/// without the caller noticing.
#[derive(Debug, Clone)]
pub struct ReservationClient {
    session: SessionManager,
    config: ClientConfig,
}

impl ReservationClient {
    /// Create a client talking HTTP to `config.api_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        config: ClientConfig,
        store: Arc<dyn CredentialStore>,
        events: Arc<dyn SessionEvents>,
    ) -> Result<Self> {
        let transport: Arc<dyn Transport> = Arc::new(HttpTransport::new(&config)?);
        Ok(Self::with_transport(config, transport, store, events))
    }

    /// Create a client over an arbitrary transport.
    pub fn with_transport(
        config: ClientConfig,
        transport: Arc<dyn Transport>,
        store: Arc<dyn CredentialStore>,
        events: Arc<dyn SessionEvents>,
    ) -> Self {
        let refresher = Arc::new(EndpointRefresher::with_path(
            transport.clone(),
            config.refresh_path.as_str(),
        ));
        let session = SessionManager::new(transport, refresher, store, events);
        Self { session, config }
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Log in and store the issued credential pair.
    #[instrument(skip(self, credentials), fields(username = credentials.username()))]
    pub async fn login(&self, credentials: &Credentials) -> Result<()> {
        let call = ApiCall::post(self.config.login_path.as_str()).json(&LoginRequest {
            username: credentials.username(),
            password: credentials.password(),
        })?;

        let tokens: LoginResponse = self.session.execute_public_as(call).await?;
        self.session.establish(
            AccessToken::new(tokens.access),
            Some(RefreshToken::new(tokens.refresh)),
        )?;

        info!("Logged in");
        Ok(())
    }

    /// Forget the stored credentials.
    pub fn logout(&self) -> Result<()> {
        self.session.logout()
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.store().has_session()
    }

    #[instrument(skip(self))]
    pub async fn list_rooms(&self) -> Result<Vec<Room>> {
        self.session
            .execute_as(ApiCall::get(endpoints::ROOM_LIST))
            .await
    }

    /// Rooms that can hold `people` and are free for `slot`.
    #[instrument(skip(self), fields(slot = %slot))]
    pub async fn check_rooms(&self, slot: &TimeSlot, people: u32) -> Result<Vec<AvailableRoom>> {
        require_people(people)?;
        let call = ApiCall::post(endpoints::RESERVATION_CHECK).json(&CheckRequest { slot, people })?;
        self.session.execute_as(call).await
    }

    /// Submit a reservation; it starts out pending approval.
    #[instrument(skip(self, topic), fields(slot = %slot))]
    pub async fn create_reservation(
        &self,
        room_id: i64,
        slot: &TimeSlot,
        topic: &str,
        people: u32,
    ) -> Result<()> {
        require_people(people)?;
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(InvalidInputError::Other {
                message: "topic must not be empty".to_string(),
            }
            .into());
        }

        let call = ApiCall::post(endpoints::RESERVATION_CREATE).json(&CreateRequest {
            room_id,
            slot,
            topic,
            people,
        })?;
        self.session.execute_as(call).await
    }

    #[instrument(skip(self))]
    pub async fn my_reservations(&self) -> Result<Vec<Reservation>> {
        self.session
            .execute_as(ApiCall::post(endpoints::MY_RESERVATIONS))
            .await
    }

    #[instrument(skip(self))]
    pub async fn cancel_reservation(&self, id: i64) -> Result<()> {
        self.session
            .execute_as(ApiCall::post(endpoints::cancel_reservation(id)))
            .await
    }

    /// Confirm an approved reservation is in use.
    ///
    /// The server only accepts this within an hour of the slot's start.
    #[instrument(skip(self))]
    pub async fn confirm_use(&self, id: i64) -> Result<()> {
        self.session
            .execute_as(ApiCall::post(endpoints::confirm_use(id)))
            .await
    }
}

fn require_people(people: u32) -> Result<()> {
    if people == 0 {
        return Err(Error::from(InvalidInputError::Other {
            message: "people must be greater than 0".to_string(),
        }));
    }
    Ok(())
}

//! meetroom-core - Session manager and API types for the meeting room reservation client.

pub mod call;
pub mod credentials;
pub mod envelope;
pub mod error;
pub mod session;
pub mod store;
pub mod tokens;
pub mod traits;
pub mod types;

pub use call::{ApiCall, ApiMethod, Attempt, TransportResponse};
pub use credentials::Credentials;
pub use envelope::{Envelope, EnvelopeUnwrapper};
pub use error::{
    ApplicationError, AuthError, Error, ErrorKind, InvalidInputError, RefreshFailure, StoreError,
    TransportError,
};
pub use session::{DEFAULT_REFRESH_PATH, EndpointRefresher, SessionManager};
pub use store::MemoryCredentialStore;
pub use tokens::{AccessToken, RefreshToken, RefreshedTokens};
pub use traits::{CredentialStore, SessionEvents, TokenRefresher, TracingEvents, Transport};
pub use types::{ApiUrl, TimeSlot};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;

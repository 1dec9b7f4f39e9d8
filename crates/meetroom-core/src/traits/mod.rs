//! Capability traits injected into the session manager.

mod events;
mod refresher;
mod store;
mod transport;

pub use events::{SessionEvents, TracingEvents};
pub use refresher::TokenRefresher;
pub use store::CredentialStore;
pub use transport::Transport;

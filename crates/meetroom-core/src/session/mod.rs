//! Session management: credential attachment, refresh and replay.

mod cycle;
mod manager;
mod refresh;

pub use manager::SessionManager;
pub use refresh::{DEFAULT_REFRESH_PATH, EndpointRefresher};

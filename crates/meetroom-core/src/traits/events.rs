//! Session event sink.

use tracing::{info, warn};

/// User-facing notifications emitted by the client core.
///
/// The core decides *when* a notification is due; the surrounding UI
/// decides how to present it.
pub trait SessionEvents: Send + Sync {
    /// An API call was rejected with an application-level message.
    fn request_failed(&self, message: &str);

    /// The API could not be reached or answered without a usable envelope.
    fn network_unreachable(&self, detail: &str);

    /// The session ended; stored credentials have already been cleared.
    fn session_expired(&self);

    /// Navigate to the login entry point.
    fn redirect_to_login(&self);
}

/// Event sink that only records events through `tracing`.
///
/// Suitable for headless use where no UI consumes the notifications.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEvents;

impl SessionEvents for TracingEvents {
    fn request_failed(&self, message: &str) {
        warn!(message, "Request failed");
    }

    fn network_unreachable(&self, detail: &str) {
        warn!(detail, "Network unreachable");
    }

    fn session_expired(&self) {
        warn!("Session expired");
    }

    fn redirect_to_login(&self) {
        info!("Login required");
    }
}

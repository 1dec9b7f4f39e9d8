//! Terminal rendering of session events.

use meetroom_core::SessionEvents;

use crate::output;

/// Prints session events to stderr.
///
/// "Redirecting to login" in a terminal means telling the user which
/// command to run next.
#[derive(Debug, Default)]
pub struct CliEvents;

impl SessionEvents for CliEvents {
    fn request_failed(&self, message: &str) {
        output::error(&format!("request failed: {}", message));
    }

    fn network_unreachable(&self, detail: &str) {
        output::error(&format!("network unreachable: {}", detail));
    }

    fn session_expired(&self) {
        output::error("session expired — redirecting to login");
    }

    fn redirect_to_login(&self) {
        output::hint("run 'meetroom login' to sign in again");
    }
}

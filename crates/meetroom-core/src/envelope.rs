//! Response envelope handling.
//!
//! Every API response body has the shape `{code, msg, data}`. `code == 0`
//! marks success; anything else is an application failure whose `msg` is
//! meant for display.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::call::TransportResponse;
use crate::error::{ApplicationError, Error, TransportError};
use crate::traits::SessionEvents;

/// Message used when a failed envelope carries no `msg`.
pub const DEFAULT_FAILURE_MESSAGE: &str = "request failed";

/// The uniform response wrapper used by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T = serde_json::Value> {
    pub code: i64,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn is_success(&self) -> bool {
        self.code == 0
    }

    /// Convert into the payload, or the application error it carries.
    pub fn into_result(self) -> Result<Option<T>, ApplicationError> {
        if self.is_success() {
            Ok(self.data)
        } else {
            let message = self
                .msg
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string());
            Err(ApplicationError::new(self.code, message))
        }
    }
}

/// Parse a response body as an envelope.
pub fn decode_envelope(body: &[u8]) -> Result<Envelope, TransportError> {
    serde_json::from_slice(body).map_err(|e| TransportError::InvalidBody {
        message: e.to_string(),
    })
}

/// Normalizes transport outcomes into a payload or a structured failure.
///
/// Failures are final: nothing here retries. Each failure is reported to
/// the [`SessionEvents`] sink before being returned.
#[derive(Clone)]
pub struct EnvelopeUnwrapper {
    events: Arc<dyn SessionEvents>,
}

impl EnvelopeUnwrapper {
    pub fn new(events: Arc<dyn SessionEvents>) -> Self {
        Self { events }
    }

    /// Unwrap a completed (or failed) round trip.
    ///
    /// Returns `data` (JSON `null` when absent) for a `code == 0` envelope.
    pub fn unwrap(
        &self,
        outcome: Result<TransportResponse, TransportError>,
    ) -> Result<serde_json::Value, Error> {
        let response = match outcome {
            Ok(response) => response,
            Err(err) => return Err(self.unreachable(err)),
        };

        trace!(status = response.status, "Unwrapping response");

        if !response.is_success() {
            return Err(self.unreachable(TransportError::Status {
                status: response.status,
            }));
        }

        let envelope = match decode_envelope(&response.body) {
            Ok(envelope) => envelope,
            Err(err) => return Err(self.unreachable(err)),
        };

        match envelope.into_result() {
            Ok(data) => Ok(data.unwrap_or(serde_json::Value::Null)),
            Err(err) => {
                debug!(code = err.code, message = %err.message, "API returned failure envelope");
                self.events.request_failed(&err.message);
                Err(err.into())
            }
        }
    }

    fn unreachable(&self, err: TransportError) -> Error {
        debug!(error = %err, "Transport failure");
        self.events.network_unreachable(&err.to_string());
        err.into()
    }
}

impl std::fmt::Debug for EnvelopeUnwrapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvelopeUnwrapper").finish_non_exhaustive()
    }
}

//! Error types for meetroom operations.
//!
//! This module provides a unified error type with explicit variants for
//! transport, application, authentication, storage, and input validation
//! failures.

use std::fmt;
use thiserror::Error;

/// The unified error type for meetroom operations.
///
/// Every failure a caller can observe maps to exactly one variant, so the
/// UI layer can branch on [`Error::kind`] instead of parsing messages.
#[derive(Debug, Error)]
pub enum Error {
    /// No usable response from the remote API.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The API answered with a non-zero envelope code.
    #[error("request failed: {0}")]
    Application(#[from] ApplicationError),

    /// Credential expiry that could not be recovered.
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// The credential store could not be read or written.
    #[error("credential store error: {0}")]
    Store(#[from] StoreError),

    /// Input validation errors (bad URL, time slot, request body).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Returns the failure kind for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Transport(_) => ErrorKind::Transport,
            Error::Application(_) => ErrorKind::Application,
            Error::Auth(AuthError::Expired) => ErrorKind::AuthExpired,
            Error::Auth(AuthError::RefreshFailed(_)) => ErrorKind::RefreshFailure,
            Error::Auth(AuthError::SessionExpired) => ErrorKind::SessionExpired,
            Error::Store(_) => ErrorKind::Store,
            Error::InvalidInput(_) => ErrorKind::InvalidInput,
        }
    }

    /// Returns true if this error ended the session (credentials were cleared).
    pub fn is_session_fatal(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::RefreshFailure | ErrorKind::SessionExpired
        )
    }
}

/// Coarse classification of an [`Error`] for user-facing handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Transport,
    Application,
    AuthExpired,
    RefreshFailure,
    SessionExpired,
    Store,
    InvalidInput,
}

/// Transport-level errors.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request exceeded the configured timeout ceiling.
    #[error("request timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    /// The server answered with a non-success status outside the auth path.
    #[error("unexpected HTTP status {status}")]
    Status { status: u16 },

    /// The response body could not be decoded.
    #[error("invalid response body: {message}")]
    InvalidBody { message: String },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// An application-level failure reported through the response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationError {
    /// Envelope code (never 0).
    pub code: i64,
    /// Server-provided message, or a default when the server sent none.
    pub message: String,
}

impl ApplicationError {
    /// Create a new application error.
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for ApplicationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

impl std::error::Error for ApplicationError {}

/// Authentication-related errors.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// The access credential was rejected (HTTP 401).
    ///
    /// Names the failure class only. [`crate::SessionManager`] never returns
    /// it: a rejected credential is either recovered or ends as
    /// [`AuthError::RefreshFailed`] / [`AuthError::SessionExpired`]. Custom
    /// [`crate::Transport`] or [`crate::TokenRefresher`] code may use it.
    #[error("access credential expired")]
    Expired,

    /// The refresh endpoint rejected the refresh credential or was unreachable.
    #[error("credential refresh failed: {0}")]
    RefreshFailed(RefreshFailure),

    /// The session cannot be recovered; credentials have been cleared.
    #[error("session expired")]
    SessionExpired,
}

impl From<RefreshFailure> for AuthError {
    fn from(failure: RefreshFailure) -> Self {
        AuthError::RefreshFailed(failure)
    }
}

impl From<RefreshFailure> for Error {
    fn from(failure: RefreshFailure) -> Self {
        Error::Auth(AuthError::RefreshFailed(failure))
    }
}

/// Why a refresh cycle failed.
///
/// Cloned to every waiter queued on the failed cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshFailure {
    reason: String,
}

impl RefreshFailure {
    /// Create a new refresh failure.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// Returns the failure reason.
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl fmt::Display for RefreshFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reason)
    }
}

impl std::error::Error for RefreshFailure {}

/// Credential store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing storage failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The persisted credentials could not be parsed.
    #[error("corrupt credential file {path}: {message}")]
    Corrupt { path: String, message: String },
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API base URL.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// Invalid reservation time slot.
    #[error("invalid time slot {start_hour}-{end_hour}: {reason}")]
    TimeSlot {
        start_hour: u8,
        end_hour: u8,
        reason: String,
    },

    /// Request body could not be serialized.
    #[error("invalid request body: {message}")]
    Body { message: String },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_classifies_auth_variants() {
        assert_eq!(
            Error::from(AuthError::SessionExpired).kind(),
            ErrorKind::SessionExpired
        );
        assert_eq!(
            Error::from(RefreshFailure::new("denied")).kind(),
            ErrorKind::RefreshFailure
        );
        assert_eq!(Error::from(AuthError::Expired).kind(), ErrorKind::AuthExpired);
    }

    #[test]
    fn session_fatal_only_for_terminal_auth_failures() {
        assert!(Error::from(AuthError::SessionExpired).is_session_fatal());
        assert!(Error::from(RefreshFailure::new("denied")).is_session_fatal());
        assert!(!Error::from(ApplicationError::new(5, "room unavailable")).is_session_fatal());
        assert!(!Error::from(TransportError::Status { status: 500 }).is_session_fatal());
    }

    #[test]
    fn application_error_display_includes_message() {
        let err = Error::from(ApplicationError::new(409, "slot taken"));
        assert_eq!(err.to_string(), "request failed: slot taken (code 409)");
    }
}

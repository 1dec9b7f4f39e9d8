//! Credential store trait.

use crate::{AccessToken, RefreshToken, Result};

/// Durable storage for the credential pair.
///
/// Access is synchronous: reads happen on every call attach and must not
/// suspend. Implementations are expected to be cheap to read.
pub trait CredentialStore: Send + Sync {
    /// Returns the stored access token, if any.
    fn access_token(&self) -> Option<AccessToken>;

    /// Returns the stored refresh token, if any.
    fn refresh_token(&self) -> Option<RefreshToken>;

    /// Replace the access token, keeping the refresh token.
    fn set_access_token(&self, token: AccessToken) -> Result<()>;

    /// Replace both slots, as after a login.
    fn save(&self, access: AccessToken, refresh: Option<RefreshToken>) -> Result<()>;

    /// Remove both tokens.
    fn clear(&self) -> Result<()>;

    /// Returns true if an access token is stored.
    fn has_session(&self) -> bool {
        self.access_token().is_some()
    }
}

//! Token refresher trait.

use async_trait::async_trait;

use crate::error::RefreshFailure;
use crate::{RefreshToken, RefreshedTokens};

/// Exchanges a refresh credential for a new access credential.
#[async_trait]
pub trait TokenRefresher: Send + Sync {
    /// Call the refresh endpoint.
    ///
    /// Every non-success outcome (rejection, network failure, malformed
    /// response) is reported uniformly as a [`RefreshFailure`].
    async fn refresh(&self, refresh_token: &RefreshToken) -> Result<RefreshedTokens, RefreshFailure>;
}

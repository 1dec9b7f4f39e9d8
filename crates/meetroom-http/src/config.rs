//! Client configuration.

use std::time::Duration;

use meetroom_core::{ApiUrl, DEFAULT_REFRESH_PATH};

use crate::endpoints;

/// Ceiling applied to every request, refreshes included.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Settings for [`HttpTransport`](crate::HttpTransport) and
/// [`ReservationClient`](crate::ReservationClient).
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use meetroom_core::ApiUrl;
/// use meetroom_http::ClientConfig;
///
/// let config = ClientConfig::new(ApiUrl::new("https://rooms.example.com").unwrap())
///     .with_timeout(Duration::from_secs(10));
/// assert_eq!(config.timeout, Duration::from_secs(10));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the reservation API.
    pub api_url: ApiUrl,
    pub timeout: Duration,
    pub login_path: String,
    pub refresh_path: String,
    pub user_agent: String,
}

impl ClientConfig {
    pub fn new(api_url: ApiUrl) -> Self {
        Self {
            api_url,
            timeout: DEFAULT_TIMEOUT,
            login_path: endpoints::LOGIN.to_string(),
            refresh_path: DEFAULT_REFRESH_PATH.to_string(),
            user_agent: concat!("meetroom/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_login_path(mut self, path: impl Into<String>) -> Self {
        self.login_path = path.into();
        self
    }

    pub fn with_refresh_path(mut self, path: impl Into<String>) -> Self {
        self.refresh_path = path.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(ApiUrl::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_backend() {
        let config = ClientConfig::default();
        assert_eq!(config.api_url.host(), Some("localhost"));
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.login_path, "/api/auth/login/");
        assert_eq!(config.refresh_path, "/api/auth/token/refresh/");
        assert!(config.user_agent.starts_with("meetroom/"));
    }

    #[test]
    fn builders_override_fields() {
        let config = ClientConfig::default()
            .with_refresh_path("/api/token/refresh/")
            .with_login_path("/login/")
            .with_user_agent("test-agent");

        assert_eq!(config.refresh_path, "/api/token/refresh/");
        assert_eq!(config.login_path, "/login/");
        assert_eq!(config.user_agent, "test-agent");
    }
}

//! API base URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidInputError};

/// A validated base URL of the reservation API.
///
/// Must use HTTPS, except for loopback hosts where plain HTTP is accepted
/// for local development.
///
/// # Example
///
/// ```
/// use meetroom_core::ApiUrl;
///
/// let api = ApiUrl::new("http://localhost:8000").unwrap();
/// assert_eq!(api.endpoint("/api/rooms/list/"), "http://localhost:8000/api/rooms/list/");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ApiUrl(Url);

impl ApiUrl {
    /// Create a new API URL from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not valid or doesn't meet requirements.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| InvalidInputError::ApiUrl {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        Ok(Self(url))
    }

    /// Returns the absolute URL for an API path.
    ///
    /// Slashes at the join point are normalized; trailing slashes on `path`
    /// are kept since the backend routes depend on them.
    pub fn endpoint(&self, path: &str) -> String {
        let base = self.0.as_str().trim_end_matches('/');
        format!("{}/{}", base, path.trim_start_matches('/'))
    }

    /// Returns the base URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the inner URL.
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        let invalid = |reason: &str| -> Error {
            InvalidInputError::ApiUrl {
                value: original.to_string(),
                reason: reason.to_string(),
            }
            .into()
        };

        if url.cannot_be_a_base() {
            return Err(invalid("must be an absolute URL"));
        }

        if url.host_str().is_none() {
            return Err(invalid("must have a host"));
        }

        let scheme = url.scheme();
        let is_loopback = url
            .host_str()
            .is_some_and(|h| h == "localhost" || h == "127.0.0.1" || h == "[::1]");

        if scheme != "https" && !(scheme == "http" && is_loopback) {
            return Err(invalid("must use HTTPS (HTTP allowed only for localhost)"));
        }

        if url.query().is_some() || url.fragment().is_some() {
            return Err(invalid("must not carry a query or fragment"));
        }

        Ok(())
    }
}

impl Default for ApiUrl {
    fn default() -> Self {
        Self(Url::parse("http://localhost:8000").expect("default API URL is valid"))
    }
}

impl fmt::Display for ApiUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ApiUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for ApiUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for ApiUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ApiUrl::new(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_https_url() {
        let api = ApiUrl::new("https://rooms.example.com").unwrap();
        assert_eq!(api.host(), Some("rooms.example.com"));
    }

    #[test]
    fn valid_localhost_http() {
        let api = ApiUrl::new("http://127.0.0.1:8000").unwrap();
        assert_eq!(api.host(), Some("127.0.0.1"));
    }

    #[test]
    fn endpoint_joins_without_double_slash() {
        let api = ApiUrl::new("https://rooms.example.com/").unwrap();
        assert_eq!(
            api.endpoint("/api/reservations/check/"),
            "https://rooms.example.com/api/reservations/check/"
        );
        assert_eq!(
            api.endpoint("api/reservations/7/cancel"),
            "https://rooms.example.com/api/reservations/7/cancel"
        );
    }

    #[test]
    fn endpoint_keeps_base_path_prefix() {
        let api = ApiUrl::new("https://example.com/booking").unwrap();
        assert_eq!(
            api.endpoint("/api/rooms/list/"),
            "https://example.com/booking/api/rooms/list/"
        );
    }

    #[test]
    fn default_points_at_local_backend() {
        assert_eq!(
            ApiUrl::default().endpoint("/api/auth/login/"),
            "http://localhost:8000/api/auth/login/"
        );
    }

    #[test]
    fn invalid_http_non_localhost() {
        assert!(ApiUrl::new("http://rooms.example.com").is_err());
    }

    #[test]
    fn invalid_relative_url() {
        assert!(ApiUrl::new("/api/rooms/list/").is_err());
    }

    #[test]
    fn invalid_with_query() {
        assert!(ApiUrl::new("https://rooms.example.com/?x=1").is_err());
    }
}

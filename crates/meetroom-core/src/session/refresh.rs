//! Refresh-endpoint client.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::call::ApiCall;
use crate::envelope::Envelope;
use crate::error::RefreshFailure;
use crate::traits::{TokenRefresher, Transport};
use crate::{AccessToken, RefreshToken, RefreshedTokens};

/// Default path of the token refresh endpoint.
pub const DEFAULT_REFRESH_PATH: &str = "/api/auth/token/refresh/";

#[derive(Serialize)]
struct RefreshRequest<'a> {
    refresh: &'a str,
}

#[derive(Default, Deserialize)]
struct TokenBody {
    access: String,
    #[serde(default)]
    refresh: Option<String>,
}

/// Accepted success shapes: the API envelope, or a bare token object.
#[derive(Deserialize)]
#[serde(untagged)]
enum RefreshBody {
    Envelope(Envelope<TokenBody>),
    Bare(TokenBody),
}

/// [`TokenRefresher`] that POSTs `{"refresh": ...}` to an endpoint.
///
/// The request goes straight to the transport, never through the session
/// manager, so a rejected refresh cannot trigger another refresh.
#[derive(Clone)]
pub struct EndpointRefresher {
    transport: Arc<dyn Transport>,
    path: String,
}

impl EndpointRefresher {
    /// Refresher for [`DEFAULT_REFRESH_PATH`].
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self::with_path(transport, DEFAULT_REFRESH_PATH)
    }

    pub fn with_path(transport: Arc<dyn Transport>, path: impl Into<String>) -> Self {
        Self {
            transport,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    fn parse(body: &[u8]) -> Result<RefreshedTokens, RefreshFailure> {
        let parsed: RefreshBody = serde_json::from_slice(body)
            .map_err(|e| RefreshFailure::new(format!("malformed refresh response: {}", e)))?;

        let tokens = match parsed {
            RefreshBody::Bare(tokens) => tokens,
            RefreshBody::Envelope(envelope) => match envelope.into_result() {
                Ok(Some(tokens)) => tokens,
                Ok(None) => {
                    return Err(RefreshFailure::new("refresh response carried no token"));
                }
                Err(err) => {
                    return Err(RefreshFailure::new(format!(
                        "refresh rejected: {}",
                        err.message
                    )));
                }
            },
        };

        if tokens.access.trim().is_empty() {
            return Err(RefreshFailure::new("refresh response carried an empty token"));
        }

        Ok(RefreshedTokens {
            access: AccessToken::new(tokens.access),
            refresh: tokens
                .refresh
                .filter(|t| !t.trim().is_empty())
                .map(RefreshToken::new),
        })
    }
}

#[async_trait]
impl TokenRefresher for EndpointRefresher {
    #[instrument(skip(self, refresh_token), fields(path = %self.path))]
    async fn refresh(&self, refresh_token: &RefreshToken) -> Result<RefreshedTokens, RefreshFailure> {
        let call = ApiCall::post(self.path.as_str())
            .json(&RefreshRequest {
                refresh: refresh_token.as_str(),
            })
            .map_err(|e| RefreshFailure::new(e.to_string()))?;

        let response = self
            .transport
            .send(&call, None)
            .await
            .map_err(|e| RefreshFailure::new(format!("refresh endpoint unreachable: {}", e)))?;

        if !response.is_success() {
            return Err(RefreshFailure::new(format!(
                "refresh endpoint returned HTTP {}",
                response.status
            )));
        }

        let tokens = Self::parse(&response.body)?;
        debug!(rotated = tokens.refresh.is_some(), "Refresh endpoint issued a new credential");
        Ok(tokens)
    }
}

impl std::fmt::Debug for EndpointRefresher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EndpointRefresher")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

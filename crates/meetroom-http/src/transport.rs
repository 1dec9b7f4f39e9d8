//! reqwest-backed transport.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Method;
use reqwest::header::{ACCEPT, HeaderValue};
use tracing::{debug, instrument, trace};

use meetroom_core::{
    AccessToken, ApiCall, ApiMethod, ApiUrl, Error, Result, Transport, TransportError,
    TransportResponse,
};

use crate::config::ClientConfig;

/// HTTP transport for the reservation API.
///
/// Returns every response the server produced, 401 included, so the session
/// manager can decide what an unauthorized status means.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    api_url: ApiUrl,
    timeout: Duration,
}

impl HttpTransport {
    /// Build a transport from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed
    /// (for example when no TLS backend is available).
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                Error::from(TransportError::Http {
                    message: format!("failed to build HTTP client: {}", e),
                })
            })?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            timeout: config.timeout,
        })
    }

    /// Returns the API URL this transport is configured for.
    pub fn api_url(&self) -> &ApiUrl {
        &self.api_url
    }

    fn map_reqwest(&self, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout {
                duration_ms: self.timeout.as_millis() as u64,
            }
        } else if err.is_connect() {
            TransportError::Connection {
                message: err.to_string(),
            }
        } else {
            TransportError::Http {
                message: err.to_string(),
            }
        }
    }
}

fn method(method: ApiMethod) -> Method {
    match method {
        ApiMethod::Get => Method::GET,
        ApiMethod::Post => Method::POST,
        ApiMethod::Put => Method::PUT,
        ApiMethod::Patch => Method::PATCH,
        ApiMethod::Delete => Method::DELETE,
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, call, bearer), fields(api = %self.api_url, call = %call))]
    async fn send(
        &self,
        call: &ApiCall,
        bearer: Option<&AccessToken>,
    ) -> std::result::Result<TransportResponse, TransportError> {
        let url = self.api_url.endpoint(call.path());
        debug!(%url, authenticated = bearer.is_some(), "API request");

        let mut request = self
            .client
            .request(method(call.method()), &url)
            .header(ACCEPT, HeaderValue::from_static("application/json"));

        for (name, value) in call.headers() {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(body) = call.body() {
            request = request.json(body);
        }
        if let Some(token) = bearer {
            request = request.bearer_auth(token.as_str());
        }

        let response = request.send().await.map_err(|e| self.map_reqwest(e))?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(|e| self.map_reqwest(e))?;
        trace!(status, len = body.len(), "API response");

        Ok(TransportResponse::new(status, body.to_vec()))
    }
}

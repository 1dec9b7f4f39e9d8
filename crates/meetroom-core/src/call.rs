//! Outbound call descriptors.
//!
//! An [`ApiCall`] describes a request independently of credentials; the
//! session manager wraps it in an [`Attempt`] for every dispatch so the
//! replay marker never lives on the shared descriptor.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::error::{Error, InvalidInputError};

/// HTTP method of an API call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl ApiMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiMethod::Get => "GET",
            ApiMethod::Post => "POST",
            ApiMethod::Put => "PUT",
            ApiMethod::Patch => "PATCH",
            ApiMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for ApiMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A replayable description of one API request.
///
/// Never carries the bearer credential; that is attached per dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiCall {
    method: ApiMethod,
    path: String,
    headers: BTreeMap<String, String>,
    body: Option<serde_json::Value>,
}

impl ApiCall {
    /// Create a call with no headers and no body.
    pub fn new(method: ApiMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: BTreeMap::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(ApiMethod::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(ApiMethod::Post, path)
    }

    /// Attach a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if `body` cannot be serialized to JSON.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, Error> {
        let value = serde_json::to_value(body).map_err(|e| InvalidInputError::Body {
            message: e.to_string(),
        })?;
        self.body = Some(value);
        Ok(self)
    }

    /// Add an extra request header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn method(&self) -> ApiMethod {
        self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    pub fn body(&self) -> Option<&serde_json::Value> {
        self.body.as_ref()
    }
}

impl fmt::Display for ApiCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

/// One dispatch of an [`ApiCall`].
///
/// The first attempt of a call may be replayed exactly once after a
/// credential refresh; a replay is never replayed again.
#[derive(Debug, Clone)]
pub struct Attempt {
    call: Arc<ApiCall>,
    already_retried: bool,
}

impl Attempt {
    /// The original dispatch of a call.
    pub fn first(call: ApiCall) -> Self {
        Self {
            call: Arc::new(call),
            already_retried: false,
        }
    }

    /// The single permitted replay of this attempt's call.
    pub fn replay(&self) -> Self {
        Self {
            call: Arc::clone(&self.call),
            already_retried: true,
        }
    }

    pub fn call(&self) -> &ApiCall {
        &self.call
    }

    pub fn already_retried(&self) -> bool {
        self.already_retried
    }
}

/// A completed HTTP round trip, before envelope inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Status reserved by the API for an invalid or expired access credential.
pub const UNAUTHORIZED: u16 = 401;

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Build a response from a JSON value.
    pub fn json(status: u16, value: &serde_json::Value) -> Self {
        Self::new(status, value.to_string())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == UNAUTHORIZED
    }
}

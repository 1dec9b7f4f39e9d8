//! Transport trait.

use async_trait::async_trait;

use crate::AccessToken;
use crate::call::{ApiCall, TransportResponse};
use crate::error::TransportError;

/// Performs one HTTP round trip for an [`ApiCall`].
///
/// Implementations return every response the server produced, whatever its
/// status; `Err` is reserved for round trips that produced no response
/// (connection failure, timeout).
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `call`, attaching `bearer` as `Authorization: Bearer <token>` when present.
    async fn send(
        &self,
        call: &ApiCall,
        bearer: Option<&AccessToken>,
    ) -> Result<TransportResponse, TransportError>;
}

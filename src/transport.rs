use crate::error::Result;
use async_trait::async_trait;

/// SOAP transport seam.
///
/// The library builds envelopes and interprets responses; actually moving
/// bytes is delegated to an implementation of this trait (an HTTP client in
/// production, a scripted double in tests). Implementations perform exactly
/// one request per `call` and never retry: batch operations are only
/// idempotent through the caller's per-row unique ids.
#[async_trait]
pub trait SoapTransport: Send + Sync {
    /// Posts `envelope` to `url` with the given SOAPAction header value and
    /// returns the raw response body. Transport-level failures map to
    /// [`crate::Error::Transport`] and propagate unmodified.
    async fn call(&self, url: &str, soap_action: &str, envelope: &str) -> Result<String>;
}

pub type SoapTransportBox = Box<dyn SoapTransport>;

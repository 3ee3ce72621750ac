use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures surfaced to callers as `Err`.
///
/// Business-level outcomes (declines, bad credentials, empty reports,
/// per-row batch rejections) are values on the response types, not errors.
#[derive(Error, Debug)]
pub enum Error {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("malformed XML in response: {0}")]
    Xml(#[from] roxmltree::Error),
    #[error("failed to build SOAP envelope: {0}")]
    EnvelopeBuild(#[from] quick_xml::Error),
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("decoded payload is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("response field not found: {0}")]
    MissingField(String),
    #[error("{operation} is not available on the {server} server")]
    RestrictedServer {
        operation: &'static str,
        server: &'static str,
    },
    #[error("batch result has {returned} rows, submitted batch had {submitted}")]
    BatchRowCountMismatch { submitted: usize, returned: usize },
    #[error("batch result row {row} does not match the submitted row")]
    BatchRowMismatch { row: usize },
}

//! Client library for the iATS NetGate SOAP payment gateway.
//!
//! [`ProcessLink`] covers single credit-card and ACH/EFT transactions plus
//! CSV batch submission with asynchronous result retrieval; [`ReportLink`]
//! covers reporting. The SOAP transport is a trait the caller implements
//! (an HTTP client in production), so the library owns only envelope
//! construction, response normalization, and the batch file codec.

mod api;
pub mod batch;
pub mod credentials;
pub mod error;
pub mod process_link;
pub mod report_link;
pub mod request;
pub mod response;
pub mod transport;
pub mod xml;

pub use credentials::{Credentials, Server};
pub use error::{Error, Result};
pub use process_link::ProcessLink;
pub use report_link::ReportLink;
pub use transport::{SoapTransport, SoapTransportBox};

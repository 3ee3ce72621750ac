use crate::api::Api;
use crate::credentials::{Credentials, Server};
use crate::error::{Error, Result};
use crate::request::RejectReportRequest;
use crate::response::{self, ReportResult};
use crate::transport::SoapTransportBox;

/// Façade over the NetGate ReportLink service.
pub struct ReportLink {
    api: Api,
}

impl ReportLink {
    pub fn new(credentials: Credentials, transport: SoapTransportBox) -> Self {
        Self {
            api: Api::new(credentials, transport, "/NetGate/ReportLink.asmx"),
        }
    }

    /// Retrieves the credit-card reject journal for a date
    /// (`GetCreditCardReject`). Three-way outcome: transactions, bad
    /// credentials, or no data for that date.
    pub async fn get_credit_card_reject(
        &self,
        request: &RejectReportRequest,
    ) -> Result<ReportResult> {
        let raw = self
            .api
            .call("GetCreditCardReject", request.fields())
            .await?;
        response::report(&raw, "GetCreditCardRejectV1Result")
    }

    /// Retrieves the credit-card reject report as CSV text
    /// (`GetCreditCardRejectCSV`). Only offered by the UK gateway; other
    /// regions fail fast without a network call.
    pub async fn get_credit_card_reject_csv(
        &self,
        request: &RejectReportRequest,
    ) -> Result<String> {
        if self.api.credentials().server() != Server::Uk {
            return Err(Error::RestrictedServer {
                operation: "GetCreditCardRejectCSV",
                server: self.api.credentials().server().name(),
            });
        }
        let raw = self
            .api
            .call("GetCreditCardRejectCSV", request.fields())
            .await?;
        response::csv_file(&raw, "GetCreditCardRejectCSVV1Result")
    }
}

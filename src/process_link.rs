use crate::api::Api;
use crate::batch::BatchKind;
use crate::credentials::Credentials;
use crate::error::Result;
use crate::request::{
    AchEftCustomerCodeRequest, AchEftRequest, BatchRequest, BatchResultRequest,
    CreateCreditCardCustomerRequest, CreditCardCustomerCodeRequest, CreditCardRequest, Fields,
    RefundRequest,
};
use crate::response::{self, ProcessResult};
use crate::transport::SoapTransportBox;

/// Acknowledgment text returned immediately by a batch submission. The
/// gateway keeps processing the batch out of band; poll
/// [`ProcessLink::get_batch_process_result_file`] after a few seconds.
pub const BATCH_PROCESSING: &str = "Batch Processing, Please Wait ....";

/// Authorization text of a completed batch result retrieval.
pub const BATCH_DONE: &str = "Batch Process Has Been Done";

/// Fixed refusal text when the server's MOP/currency matrix disallows a
/// combination. Returned without any network call.
pub const MOP_CURRENCY_RESTRICTED: &str =
    "Service cannot be used with this Method of Payment or Currency.";

/// Façade over the NetGate ProcessLink service: one method per remote
/// operation. Each method only shapes its request fields and picks the
/// right result element; all interpretation lives in the response handler.
pub struct ProcessLink {
    api: Api,
}

impl ProcessLink {
    pub fn new(credentials: Credentials, transport: SoapTransportBox) -> Self {
        Self {
            api: Api::new(credentials, transport, "/NetGate/ProcessLink.asmx"),
        }
    }

    /// Charges a credit card (`ProcessCreditCard`).
    pub async fn process_credit_card(&self, request: &CreditCardRequest) -> Result<ProcessResult> {
        if let Some(refused) = self.check_matrix(request.currency.as_deref(), &request.mop) {
            return Ok(refused);
        }
        self.record_call("ProcessCreditCard", request.fields()).await
    }

    /// Charges a previously stored card by customer code
    /// (`ProcessCreditCardWithCustomerCode`).
    pub async fn process_credit_card_with_customer_code(
        &self,
        request: &CreditCardCustomerCodeRequest,
    ) -> Result<ProcessResult> {
        if let Some(refused) = self.check_matrix(request.currency.as_deref(), &request.mop) {
            return Ok(refused);
        }
        self.record_call("ProcessCreditCardWithCustomerCode", request.fields())
            .await
    }

    /// Charges a card and stores it under a new customer code
    /// (`CreateCustomerCodeAndProcessCreditCard`).
    pub async fn create_customer_code_and_process_credit_card(
        &self,
        request: &CreateCreditCardCustomerRequest,
    ) -> Result<ProcessResult> {
        if let Some(refused) = self.check_matrix(request.currency.as_deref(), &request.mop) {
            return Ok(refused);
        }
        self.record_call("CreateCustomerCodeAndProcessCreditCard", request.fields())
            .await
    }

    /// Processes a direct debit (`ProcessACHEFT`).
    pub async fn process_ach_eft(&self, request: &AchEftRequest) -> Result<ProcessResult> {
        self.record_call("ProcessACHEFT", request.fields()).await
    }

    /// Processes a direct debit against a stored customer code
    /// (`ProcessACHEFTWithCustomerCode`).
    pub async fn process_ach_eft_with_customer_code(
        &self,
        request: &AchEftCustomerCodeRequest,
    ) -> Result<ProcessResult> {
        self.record_call("ProcessACHEFTWithCustomerCode", request.fields())
            .await
    }

    /// Processes a direct debit and stores the account under a new customer
    /// code (`CreateCustomerCodeAndProcessACHEFT`).
    pub async fn create_customer_code_and_process_ach_eft(
        &self,
        request: &AchEftRequest,
    ) -> Result<ProcessResult> {
        self.record_call("CreateCustomerCodeAndProcessACHEFT", request.fields())
            .await
    }

    /// Refunds a settled credit-card transaction by id
    /// (`ProcessCreditCardRefundWithTransactionId`). `total` is negative.
    pub async fn process_credit_card_refund_with_transaction_id(
        &self,
        request: &RefundRequest,
    ) -> Result<ProcessResult> {
        if let Some(mop) = &request.mop
            && let Some(refused) = self.check_matrix(request.currency.as_deref(), mop)
        {
            return Ok(refused);
        }
        self.record_call("ProcessCreditCardRefundWithTransactionId", request.fields())
            .await
    }

    /// Refunds a settled ACH/EFT transaction by id
    /// (`ProcessACHEFTRefundWithTransactionId`).
    pub async fn process_ach_eft_refund_with_transaction_id(
        &self,
        request: &RefundRequest,
    ) -> Result<ProcessResult> {
        self.record_call("ProcessACHEFTRefundWithTransactionId", request.fields())
            .await
    }

    /// Submits an ACH/EFT charge batch (`ProcessACHEFTChargeBatch`). A
    /// successful submission acknowledges with [`BATCH_PROCESSING`] and a
    /// batch id; per-row outcomes arrive later in the result file.
    pub async fn process_ach_eft_charge_batch(
        &self,
        request: &BatchRequest,
    ) -> Result<ProcessResult> {
        self.submit_batch(BatchKind::AchEftCharge, request).await
    }

    /// Submits an ACH/EFT refund batch (`ProcessACHEFTRefundBatch`).
    pub async fn process_ach_eft_refund_batch(
        &self,
        request: &BatchRequest,
    ) -> Result<ProcessResult> {
        self.submit_batch(BatchKind::AchEftRefund, request).await
    }

    /// Submits a credit-card batch (`ProcessCreditCardBatch`).
    pub async fn process_credit_card_batch(
        &self,
        request: &BatchRequest,
    ) -> Result<ProcessResult> {
        self.submit_batch(BatchKind::CreditCard, request).await
    }

    /// Retrieves the result file of a submitted batch
    /// (`GetBatchProcessResultFile`). Once processing is done the record's
    /// authorization result is [`BATCH_DONE`] and
    /// `TransactionRecord::batch_result_file` holds the per-row outcomes.
    pub async fn get_batch_process_result_file(
        &self,
        request: &BatchResultRequest,
    ) -> Result<ProcessResult> {
        self.record_call("GetBatchProcessResultFile", request.fields())
            .await
    }

    async fn submit_batch(&self, kind: BatchKind, request: &BatchRequest) -> Result<ProcessResult> {
        self.record_call(kind.operation(), request.fields()).await
    }

    async fn record_call(&self, operation: &'static str, fields: Fields) -> Result<ProcessResult> {
        let raw = self.api.call(operation, fields).await?;
        response::record(&raw, &format!("{operation}V1Result"))
    }

    fn check_matrix(&self, currency: Option<&str>, mop: &str) -> Option<ProcessResult> {
        let currency = currency?;
        if self.api.credentials().server().supports(currency, mop) {
            None
        } else {
            Some(ProcessResult::Restricted(MOP_CURRENCY_RESTRICTED))
        }
    }
}

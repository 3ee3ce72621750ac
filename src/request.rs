use crate::batch::{AccountType, BatchFile};
use masking::{PeekInterface, Secret};
use rust_decimal::Decimal;

/// Request field list in wire order. Optional fields that are `None` are
/// omitted entirely, never sent as empty strings: the gateway distinguishes
/// an absent element from a blank one.
pub(crate) type Fields = Vec<(&'static str, String)>;

fn push_opt(fields: &mut Fields, name: &'static str, value: &Option<String>) {
    if let Some(value) = value {
        fields.push((name, value.clone()));
    }
}

/// A single credit-card charge (`ProcessCreditCard`).
#[derive(Debug, Clone)]
pub struct CreditCardRequest {
    pub customer_ip_address: Option<String>,
    pub invoice_num: Option<String>,
    pub credit_card_num: Secret<String>,
    /// Expiry as MM/YY.
    pub credit_card_expiry: Secret<String>,
    pub cvv2: Option<Secret<String>>,
    pub mop: String,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub total: Decimal,
    pub comment: Option<String>,
    pub currency: Option<String>,
}

impl CreditCardRequest {
    pub(crate) fn fields(&self) -> Fields {
        let mut fields = Fields::new();
        push_opt(&mut fields, "customerIPAddress", &self.customer_ip_address);
        push_opt(&mut fields, "invoiceNum", &self.invoice_num);
        fields.push(("creditCardNum", self.credit_card_num.peek().clone()));
        fields.push(("creditCardExpiry", self.credit_card_expiry.peek().clone()));
        if let Some(cvv2) = &self.cvv2 {
            fields.push(("cvv2", cvv2.peek().clone()));
        }
        fields.push(("mop", self.mop.clone()));
        fields.push(("firstName", self.first_name.clone()));
        fields.push(("lastName", self.last_name.clone()));
        fields.push(("address", self.address.clone()));
        fields.push(("city", self.city.clone()));
        fields.push(("state", self.state.clone()));
        fields.push(("zipCode", self.zip_code.clone()));
        fields.push(("total", self.total.to_string()));
        push_opt(&mut fields, "comment", &self.comment);
        push_opt(&mut fields, "currency", &self.currency);
        fields
    }
}

/// A credit-card charge against a stored customer code
/// (`ProcessCreditCardWithCustomerCode`). No card data travels with the
/// request.
#[derive(Debug, Clone)]
pub struct CreditCardCustomerCodeRequest {
    pub customer_ip_address: Option<String>,
    pub customer_code: String,
    pub invoice_num: Option<String>,
    pub cvv2: Option<Secret<String>>,
    pub mop: String,
    pub total: Decimal,
    pub comment: Option<String>,
    pub currency: Option<String>,
}

impl CreditCardCustomerCodeRequest {
    pub(crate) fn fields(&self) -> Fields {
        let mut fields = Fields::new();
        push_opt(&mut fields, "customerIPAddress", &self.customer_ip_address);
        fields.push(("customerCode", self.customer_code.clone()));
        push_opt(&mut fields, "invoiceNum", &self.invoice_num);
        if let Some(cvv2) = &self.cvv2 {
            fields.push(("cvv2", cvv2.peek().clone()));
        }
        fields.push(("mop", self.mop.clone()));
        fields.push(("total", self.total.to_string()));
        push_opt(&mut fields, "comment", &self.comment);
        push_opt(&mut fields, "currency", &self.currency);
        fields
    }
}

/// Charge a card and store it as a reusable customer code in one call
/// (`CreateCustomerCodeAndProcessCreditCard`). This operation names its card
/// fields differently from the plain charge.
#[derive(Debug, Clone)]
pub struct CreateCreditCardCustomerRequest {
    pub customer_ip_address: Option<String>,
    pub invoice_num: Option<String>,
    pub cc_num: Secret<String>,
    /// Expiry as MM/YY.
    pub cc_exp: Secret<String>,
    pub cvv2: Option<Secret<String>>,
    pub mop: String,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub total: Decimal,
    pub comment: Option<String>,
    pub currency: Option<String>,
}

impl CreateCreditCardCustomerRequest {
    pub(crate) fn fields(&self) -> Fields {
        let mut fields = Fields::new();
        push_opt(&mut fields, "customerIPAddress", &self.customer_ip_address);
        push_opt(&mut fields, "invoiceNum", &self.invoice_num);
        fields.push(("ccNum", self.cc_num.peek().clone()));
        fields.push(("ccExp", self.cc_exp.peek().clone()));
        if let Some(cvv2) = &self.cvv2 {
            fields.push(("cvv2", cvv2.peek().clone()));
        }
        fields.push(("mop", self.mop.clone()));
        fields.push(("firstName", self.first_name.clone()));
        fields.push(("lastName", self.last_name.clone()));
        fields.push(("address", self.address.clone()));
        fields.push(("city", self.city.clone()));
        fields.push(("state", self.state.clone()));
        fields.push(("zipCode", self.zip_code.clone()));
        fields.push(("total", self.total.to_string()));
        push_opt(&mut fields, "comment", &self.comment);
        push_opt(&mut fields, "currency", &self.currency);
        fields
    }
}

/// A single ACH/EFT direct debit (`ProcessACHEFT`), also the request shape
/// for `CreateCustomerCodeAndProcessACHEFT`.
#[derive(Debug, Clone)]
pub struct AchEftRequest {
    pub customer_ip_address: Option<String>,
    pub invoice_num: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub account_num: Secret<String>,
    pub account_type: AccountType,
    pub total: Decimal,
    pub comment: Option<String>,
    pub currency: Option<String>,
}

impl AchEftRequest {
    pub(crate) fn fields(&self) -> Fields {
        let mut fields = Fields::new();
        push_opt(&mut fields, "customerIPAddress", &self.customer_ip_address);
        push_opt(&mut fields, "invoiceNum", &self.invoice_num);
        fields.push(("firstName", self.first_name.clone()));
        fields.push(("lastName", self.last_name.clone()));
        fields.push(("address", self.address.clone()));
        fields.push(("city", self.city.clone()));
        fields.push(("state", self.state.clone()));
        fields.push(("zipCode", self.zip_code.clone()));
        fields.push(("accountNum", self.account_num.peek().clone()));
        fields.push(("accountType", self.account_type.as_str().to_string()));
        fields.push(("total", self.total.to_string()));
        push_opt(&mut fields, "comment", &self.comment);
        push_opt(&mut fields, "currency", &self.currency);
        fields
    }
}

/// An ACH/EFT debit against a stored customer code
/// (`ProcessACHEFTWithCustomerCode`).
#[derive(Debug, Clone)]
pub struct AchEftCustomerCodeRequest {
    pub customer_ip_address: Option<String>,
    pub customer_code: String,
    pub invoice_num: Option<String>,
    pub total: Decimal,
    pub comment: Option<String>,
    pub currency: Option<String>,
}

impl AchEftCustomerCodeRequest {
    pub(crate) fn fields(&self) -> Fields {
        let mut fields = Fields::new();
        push_opt(&mut fields, "customerIPAddress", &self.customer_ip_address);
        fields.push(("customerCode", self.customer_code.clone()));
        push_opt(&mut fields, "invoiceNum", &self.invoice_num);
        fields.push(("total", self.total.to_string()));
        push_opt(&mut fields, "comment", &self.comment);
        push_opt(&mut fields, "currency", &self.currency);
        fields
    }
}

/// A refund against a settled transaction, by transaction id. `total` must
/// be negative.
#[derive(Debug, Clone)]
pub struct RefundRequest {
    pub customer_ip_address: Option<String>,
    pub transaction_id: String,
    pub total: Decimal,
    pub comment: Option<String>,
    /// Method of payment; required for credit-card refunds, absent for
    /// ACH/EFT.
    pub mop: Option<String>,
    pub currency: Option<String>,
}

impl RefundRequest {
    pub(crate) fn fields(&self) -> Fields {
        let mut fields = Fields::new();
        push_opt(&mut fields, "customerIPAddress", &self.customer_ip_address);
        fields.push(("transactionId", self.transaction_id.clone()));
        fields.push(("total", self.total.to_string()));
        push_opt(&mut fields, "comment", &self.comment);
        push_opt(&mut fields, "mop", &self.mop);
        push_opt(&mut fields, "currency", &self.currency);
        fields
    }
}

/// The batch payload as it should travel in the `batchFile` field.
///
/// The gateway base64-encodes the transport payload itself, so handing it
/// already-encoded text means the content arrives double-encoded and every
/// row comes back "Wrong Format". That variant is still expressible because
/// callers integrating existing pipelines sometimes hold pre-encoded data;
/// it is deliberate, supported, and discouraged.
#[derive(Debug, Clone)]
pub enum BatchPayload {
    Raw(String),
    PreEncoded(String),
}

impl BatchPayload {
    pub(crate) fn wire_value(&self) -> String {
        match self {
            BatchPayload::Raw(text) | BatchPayload::PreEncoded(text) => text.clone(),
        }
    }
}

impl From<&BatchFile> for BatchPayload {
    fn from(batch: &BatchFile) -> Self {
        BatchPayload::Raw(batch.to_csv())
    }
}

/// A batch submission (`ProcessACHEFTChargeBatch`, `ProcessACHEFTRefundBatch`
/// or `ProcessCreditCardBatch`).
#[derive(Debug, Clone)]
pub struct BatchRequest {
    pub customer_ip_address: Option<String>,
    pub payload: BatchPayload,
}

impl BatchRequest {
    pub(crate) fn fields(&self) -> Fields {
        let mut fields = Fields::new();
        push_opt(&mut fields, "customerIPAddress", &self.customer_ip_address);
        fields.push(("batchFile", self.payload.wire_value()));
        fields
    }
}

/// Poll for a submitted batch's result file (`GetBatchProcessResultFile`).
/// The gateway processes batches out of band; callers poll after a delay of
/// several seconds until the result is available.
#[derive(Debug, Clone)]
pub struct BatchResultRequest {
    pub customer_ip_address: Option<String>,
    pub batch_id: String,
}

impl BatchResultRequest {
    pub(crate) fn fields(&self) -> Fields {
        let mut fields = Fields::new();
        push_opt(&mut fields, "customerIPAddress", &self.customer_ip_address);
        fields.push(("batchId", self.batch_id.clone()));
        fields
    }
}

/// A daily report request (`GetCreditCardReject` and its CSV variant).
#[derive(Debug, Clone)]
pub struct RejectReportRequest {
    pub customer_ip_address: Option<String>,
    /// The report date as a unix timestamp, midnight of the business day.
    pub date: i64,
}

impl RejectReportRequest {
    pub(crate) fn fields(&self) -> Fields {
        let mut fields = Fields::new();
        push_opt(&mut fields, "customerIPAddress", &self.customer_ip_address);
        fields.push(("date", self.date.to_string()));
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_absent_optionals_are_omitted() {
        let request = AchEftCustomerCodeRequest {
            customer_ip_address: None,
            customer_code: "A1234567".to_string(),
            invoice_num: None,
            total: dec!(5),
            comment: None,
            currency: None,
        };
        let fields = request.fields();
        assert_eq!(
            fields,
            vec![
                ("customerCode", "A1234567".to_string()),
                ("total", "5".to_string()),
            ]
        );
    }

    #[test]
    fn test_credit_card_field_names_and_order() {
        let request = CreditCardRequest {
            customer_ip_address: Some(String::new()),
            invoice_num: Some("00000001".to_string()),
            credit_card_num: Secret::new("4222222222222220".to_string()),
            credit_card_expiry: Secret::new("12/30".to_string()),
            cvv2: Some(Secret::new("000".to_string())),
            mop: "VISA".to_string(),
            first_name: "Test".to_string(),
            last_name: "Account".to_string(),
            address: "1234 Any Street".to_string(),
            city: "Schenectady".to_string(),
            state: "NY".to_string(),
            zip_code: "12345".to_string(),
            total: dec!(5),
            comment: Some("Process CC test.".to_string()),
            currency: Some("USD".to_string()),
        };
        let names: Vec<&str> = request.fields().iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            vec![
                "customerIPAddress",
                "invoiceNum",
                "creditCardNum",
                "creditCardExpiry",
                "cvv2",
                "mop",
                "firstName",
                "lastName",
                "address",
                "city",
                "state",
                "zipCode",
                "total",
                "comment",
                "currency",
            ]
        );
    }

    #[test]
    fn test_batch_payload_from_batch_file() {
        let batch = crate::batch::BatchFile::from_rows(
            crate::batch::BatchKind::AchEftCharge,
            vec![vec!["1".to_string(), "Test".to_string()]],
        );
        let payload = BatchPayload::from(&batch);
        assert_eq!(payload.wire_value(), "1,Test");
    }
}

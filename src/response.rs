use crate::error::{Error, Result};
use crate::xml::{self, Value};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use tracing::debug;

/// Outcome of a record-format ProcessLink call.
///
/// Declines and credential failures are values here rather than errors:
/// callers branch on the variant, only protocol-level problems (malformed
/// XML, missing result element, transport faults) come back as `Err`.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessResult {
    /// STATUS was Success and the gateway produced a process result.
    Transaction(TransactionRecord),
    /// The transaction was submitted but declined with a REJECT code.
    Reject(Rejection),
    /// STATUS was Failure: the agent code or password was not accepted.
    BadCredentials,
    /// Refused client-side: the server's MOP/currency matrix does not allow
    /// the requested combination. No network call was made.
    Restricted(&'static str),
}

impl ProcessResult {
    /// The transaction record, if the call was accepted.
    pub fn record(&self) -> Option<&TransactionRecord> {
        match self {
            ProcessResult::Transaction(record) => Some(record),
            _ => None,
        }
    }
}

/// The normalized `PROCESSRESULT` element of an accepted call.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    fields: Value,
}

impl TransactionRecord {
    fn new(fields: Value) -> Self {
        Self { fields }
    }

    /// A named response field, trimmed. The gateway pads several fields with
    /// leading whitespace.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get_text(key).map(str::trim)
    }

    pub fn authorization_result(&self) -> Option<&str> {
        self.get("AUTHORIZATIONRESULT")
    }

    /// Whether the gateway authorized the transaction.
    pub fn is_ok(&self) -> bool {
        self.authorization_result()
            .is_some_and(|auth| auth.starts_with("OK"))
    }

    pub fn customer_code(&self) -> Option<&str> {
        self.get("CUSTOMERCODE")
    }

    pub fn transaction_id(&self) -> Option<&str> {
        self.get("TRANSACTIONID")
    }

    pub fn batch_id(&self) -> Option<&str> {
        self.get("BATCHID")
    }

    /// Decodes the base64 `BATCHPROCESSRESULTFILE` payload returned by
    /// `GetBatchProcessResultFile`.
    pub fn batch_result_file(&self) -> Result<String> {
        let encoded = self
            .get("BATCHPROCESSRESULTFILE")
            .ok_or_else(|| Error::MissingField("BATCHPROCESSRESULTFILE".to_string()))?;
        let decoded = BASE64.decode(encoded.trim())?;
        Ok(String::from_utf8(decoded)?)
    }
}

/// A declined transaction: the `AUTHORIZATIONRESULT` carried a REJECT code.
#[derive(Debug, Clone, PartialEq)]
pub struct Rejection {
    /// Numeric reject code, when the gateway supplied one.
    pub code: Option<u16>,
    /// Documented decline message for the code.
    pub message: &'static str,
    /// The raw authorization result text, trimmed.
    pub raw: String,
}

/// Outcome of a record-format report call: a three-way result, not a
/// pass/fail boolean.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportResult {
    /// The journal report's transactions, one entry per `TN` element, in
    /// document order.
    Transactions(Vec<Value>),
    /// STATUS was Failure.
    BadCredentials,
    /// The call succeeded but the report holds nothing for that date.
    NoData,
}

impl ReportResult {
    /// Fixed indicator text for the two no-payload outcomes.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            ReportResult::Transactions(_) => None,
            ReportResult::BadCredentials => Some("Bad Credentials"),
            ReportResult::NoData => Some("No data returned for this date"),
        }
    }
}

/// Extracts and interprets the named result element of a record-format
/// ProcessLink response.
pub fn record(raw: &str, result_field: &str) -> Result<ProcessResult> {
    let normalized = normalize_result(raw, result_field)?;
    if is_failure(&normalized) {
        debug!(result_field, "gateway reported STATUS Failure");
        return Ok(ProcessResult::BadCredentials);
    }

    let process_result = normalized
        .get("PROCESSRESULT")
        .ok_or_else(|| Error::MissingField("PROCESSRESULT".to_string()))?;
    let record = TransactionRecord::new(process_result.clone());

    if let Some(auth) = record.authorization_result()
        && auth.starts_with("REJECT")
    {
        let code = auth
            .split(':')
            .nth(1)
            .and_then(|code| code.trim().parse().ok());
        debug!(result_field, code, "gateway rejected transaction");
        return Ok(ProcessResult::Reject(Rejection {
            code,
            message: reject_message(code),
            raw: auth.to_string(),
        }));
    }

    Ok(ProcessResult::Transaction(record))
}

/// Extracts the journal payload of a report-format ReportLink response.
pub fn report(raw: &str, result_field: &str) -> Result<ReportResult> {
    let normalized = normalize_result(raw, result_field)?;
    if is_failure(&normalized) {
        return Ok(ReportResult::BadCredentials);
    }
    match normalized.get("JOURNALREPORT") {
        Some(journal) => {
            let transactions: Vec<Value> =
                journal.get_all("TN").into_iter().cloned().collect();
            if transactions.is_empty() {
                Ok(ReportResult::NoData)
            } else {
                Ok(ReportResult::Transactions(transactions))
            }
        }
        None => Ok(ReportResult::NoData),
    }
}

/// Extracts the embedded report file of a CSV-format ReportLink response
/// and base64-decodes it. Line terminators come back exactly as the gateway
/// produced them.
pub fn csv_file(raw: &str, result_field: &str) -> Result<String> {
    let doc = roxmltree::Document::parse(raw)?;
    let result = xml::find_element(&doc, result_field)
        .ok_or_else(|| Error::MissingField(result_field.to_string()))?;
    let file = result
        .descendants()
        .find(|node| node.is_element() && node.tag_name().name() == "FILE")
        .and_then(|node| node.text())
        .ok_or_else(|| Error::MissingField("FILE".to_string()))?;
    let decoded = BASE64.decode(file.trim())?;
    Ok(String::from_utf8(decoded)?)
}

/// Normalizes the `IATSRESPONSE` document inside the named result element.
/// `STATUS`, `PROCESSRESULT` and `JOURNALREPORT` are children of
/// `IATSRESPONSE`, not of the result element itself.
fn normalize_result(raw: &str, result_field: &str) -> Result<Value> {
    let doc = roxmltree::Document::parse(raw)?;
    let result = xml::find_element(&doc, result_field)
        .ok_or_else(|| Error::MissingField(result_field.to_string()))?;
    let response = result
        .descendants()
        .find(|node| node.is_element() && node.tag_name().name() == "IATSRESPONSE")
        .ok_or_else(|| Error::MissingField("IATSRESPONSE".to_string()))?;
    Ok(xml::normalize(response))
}

fn is_failure(normalized: &Value) -> bool {
    normalized.get_text("STATUS").map(str::trim) == Some("Failure")
}

/// Documented decline messages for NetGate REJECT codes.
pub fn reject_message(code: Option<u16>) -> &'static str {
    match code {
        Some(1) => "Agent code has not been set up on the authorization system.",
        Some(2) => "Unable to process transaction. Verify and re-enter credit card information.",
        Some(3) => "Invalid Customer Code.",
        Some(4) => "Incorrect expiry date.",
        Some(5) => "Invalid transaction. Verify and re-enter credit card information.",
        Some(6) => "Please have cardholder call the number on the back of the card.",
        Some(7) => "Lost or stolen card.",
        Some(8) => "Invalid card status.",
        Some(9) => "Restricted card status. Usually on corporate cards restricted to specific sales.",
        Some(10) => "Error. Please verify and re-enter credit card information.",
        Some(11) => "General decline code. Please have client call the number on the back of credit card",
        Some(12) => "Incorrect CVV2 or expiry date.",
        Some(14) => "The card is over the limit.",
        Some(15) => "General decline code. Please have client call the number on the back of credit card",
        Some(16) => "Invalid charge card number. Verify and re-enter credit card information.",
        Some(17) => "Unauthorized transaction.",
        Some(18) => "Card not supported by institution.",
        Some(19) => "Incorrect CVV2 security code.",
        Some(22) => "Bank timeout. Bank lines may be down or busy. Retry transaction later.",
        Some(23) => "System error. Retry transaction later.",
        Some(24) => "Charge card expired.",
        Some(25) => "Capture card. Reported lost or stolen.",
        Some(26) => "Invalid transaction, invalid expiry date. Confirm and retry transaction.",
        Some(27) => "Please have cardholder call the number on the back of the card.",
        Some(32) => "Invalid charge card number.",
        Some(40) => "Invalid card number. Card not supported by IATS.",
        Some(41) => "Invalid expiry date.",
        Some(42) => "CVV2 required.",
        Some(43) => "Incorrect AVS.",
        Some(44) => "Incorrect bank account number.",
        Some(45) => "Customer code cannot be used for cardholder transactions.",
        Some(100) => "Do not reprocess.",
        _ => "Transaction declined with an unrecognized reject code.",
    }
}

use crate::error::{Error, Result};
use masking::{PeekInterface, Secret};
use rust_decimal::Decimal;
use time::{Date, OffsetDateTime};

/// The three batch schemas NetGate accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchKind {
    AchEftCharge,
    AchEftRefund,
    CreditCard,
}

impl BatchKind {
    /// Number of comma-separated fields per row.
    pub fn field_count(&self) -> usize {
        match self {
            BatchKind::AchEftCharge | BatchKind::AchEftRefund => 7,
            BatchKind::CreditCard => 12,
        }
    }

    /// Zero-based index of the field the gateway echoes back obfuscated
    /// (bank account number or card number). Result rows must be compared
    /// with this position masked, since raw sensitive data is never echoed.
    pub fn masked_field(&self) -> usize {
        match self {
            BatchKind::AchEftCharge | BatchKind::AchEftRefund => 4,
            BatchKind::CreditCard => 10,
        }
    }

    pub fn operation(&self) -> &'static str {
        match self {
            BatchKind::AchEftCharge => "ProcessACHEFTChargeBatch",
            BatchKind::AchEftRefund => "ProcessACHEFTRefundBatch",
            BatchKind::CreditCard => "ProcessCreditCardBatch",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountType {
    Checking,
    Saving,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Checking => "CHECKING",
            AccountType::Saving => "SAVING",
        }
    }
}

/// One row of an ACH/EFT charge or refund batch. Refund rows carry a
/// negative amount.
#[derive(Debug, Clone)]
pub struct AchEftBatchRow {
    /// Caller-chosen unique id, first field of the row. Must be distinct
    /// across concurrently outstanding batches or the gateway reports the
    /// row as Duplicated. See [`timestamp_row_id`].
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub account_type: AccountType,
    pub account_number: Secret<String>,
    pub amount: Decimal,
    pub comment: String,
}

impl AchEftBatchRow {
    fn fields(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.first_name.clone(),
            self.last_name.clone(),
            self.account_type.as_str().to_string(),
            self.account_number.peek().clone(),
            format!("{:.2}", self.amount),
            self.comment.clone(),
        ]
    }
}

/// One row of a credit-card batch.
#[derive(Debug, Clone)]
pub struct CreditCardBatchRow {
    pub date: Date,
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub amount: Decimal,
    pub mop: String,
    pub card_number: Secret<String>,
    /// Expiry as MMYY, e.g. `1230`.
    pub expiry: String,
}

impl CreditCardBatchRow {
    fn fields(&self) -> Vec<String> {
        vec![
            format!(
                "{:02}/{:02}/{:04}",
                self.date.month() as u8,
                self.date.day(),
                self.date.year()
            ),
            self.id.clone(),
            self.first_name.clone(),
            self.last_name.clone(),
            self.address.clone(),
            self.city.clone(),
            self.state.clone(),
            self.zip_code.clone(),
            format!("{:.2}", self.amount),
            self.mop.clone(),
            self.card_number.peek().clone(),
            self.expiry.clone(),
        ]
    }
}

/// An ordered batch of transaction rows, serialized to the gateway's CSV
/// convention: fields joined with commas, rows joined with a single newline,
/// no trailing newline and no quoting or escaping.
#[derive(Debug, Clone)]
pub struct BatchFile {
    kind: BatchKind,
    rows: Vec<Vec<String>>,
}

impl BatchFile {
    pub fn ach_eft_charge(rows: impl IntoIterator<Item = AchEftBatchRow>) -> Self {
        Self {
            kind: BatchKind::AchEftCharge,
            rows: rows.into_iter().map(|row| row.fields()).collect(),
        }
    }

    pub fn ach_eft_refund(rows: impl IntoIterator<Item = AchEftBatchRow>) -> Self {
        Self {
            kind: BatchKind::AchEftRefund,
            rows: rows.into_iter().map(|row| row.fields()).collect(),
        }
    }

    pub fn credit_card(rows: impl IntoIterator<Item = CreditCardBatchRow>) -> Self {
        Self {
            kind: BatchKind::CreditCard,
            rows: rows.into_iter().map(|row| row.fields()).collect(),
        }
    }

    /// Builds a batch from raw field sequences. The gateway validates the
    /// shape server-side; structurally wrong rows come back with a
    /// "Wrong Format" status rather than failing the submission call.
    pub fn from_rows(kind: BatchKind, rows: Vec<Vec<String>>) -> Self {
        Self { kind, rows }
    }

    pub fn kind(&self) -> BatchKind {
        self.kind
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn to_csv(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.join(","))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Per-row terminal status, taken from the prefix of the result message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStatus {
    Ok,
    Received,
    WrongFormat,
    Duplicated,
    Unknown,
}

/// One row of a batch result file: the echoed (possibly masked) submitted
/// fields plus the gateway's outcome message.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchResultRow {
    pub fields: Vec<String>,
    pub message: String,
}

impl BatchResultRow {
    pub fn status(&self) -> RowStatus {
        if self.message.starts_with("OK") {
            RowStatus::Ok
        } else if self.message.starts_with("Received") {
            RowStatus::Received
        } else if self.message.starts_with("Wrong Format") {
            RowStatus::WrongFormat
        } else if self.message.starts_with("Duplicated") {
            RowStatus::Duplicated
        } else {
            RowStatus::Unknown
        }
    }
}

/// A parsed batch result file.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchResult {
    rows: Vec<BatchResultRow>,
}

impl BatchResult {
    /// Splits the decoded result text on CRLF and takes the last
    /// comma-separated field of each row as the outcome message.
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Self { rows: Vec::new() };
        }
        let rows = trimmed
            .split("\r\n")
            .map(|line| {
                let mut fields: Vec<String> = line.split(',').map(str::to_string).collect();
                let message = fields.pop().unwrap_or_default();
                BatchResultRow { fields, message }
            })
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[BatchResultRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Checks the result against the submitted batch: same row count, same
    /// order, and field-for-field equality with the sensitive position
    /// masked the way the gateway masks it. A mismatch is a data-integrity
    /// defect, not a business outcome.
    pub fn verify_against(&self, submitted: &BatchFile) -> Result<()> {
        if self.rows.len() != submitted.len() {
            return Err(Error::BatchRowCountMismatch {
                submitted: submitted.len(),
                returned: self.rows.len(),
            });
        }

        let masked = submitted.kind().masked_field();
        for (index, (original, returned)) in
            submitted.rows().iter().zip(self.rows.iter()).enumerate()
        {
            if original.len() != returned.fields.len() {
                return Err(Error::BatchRowMismatch { row: index });
            }
            // The gateway never echoes the raw sensitive field, so adopt its
            // masked form before comparing. Rows it rejected outright come
            // back unmasked and compare equal either way.
            let mut expected = original.clone();
            if let (Some(slot), Some(echoed)) =
                (expected.get_mut(masked), returned.fields.get(masked))
            {
                slot.clone_from(echoed);
            }
            if expected != returned.fields {
                return Err(Error::BatchRowMismatch { row: index });
            }
        }
        Ok(())
    }
}

/// A unix-timestamp-derived row id. `offset` keeps ids distinct within one
/// batch built in a single instant.
pub fn timestamp_row_id(offset: i64) -> String {
    (OffsetDateTime::now_utc().unix_timestamp() + offset).to_string()
}

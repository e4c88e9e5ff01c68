use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::common::{parse_amount, require_text, Identifiable};
use crate::domain::sme::SmeId;
use crate::errors::{LedgerError, LedgerResult};

/// Receipt numbers start after this offset: the first logged payment is `R-101`.
pub const RECEIPT_BASE: usize = 100;

/// Unique receipt number of a logged payment (`R-<n>`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReceiptId(String);

impl ReceiptId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Receipt number for a payment appended to a log holding `existing` entries.
    pub fn for_position(existing: usize) -> Self {
        Self(format!("R-{}", RECEIPT_BASE + existing + 1))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReceiptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A repayment logged against an SME. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub receipt_id: ReceiptId,
    pub date: NaiveDate,
    pub sme_id: SmeId,
    pub amount_paid: f64,
    pub collector_name: String,
}

impl Identifiable for Transaction {
    fn id(&self) -> &str {
        self.receipt_id.as_str()
    }
}

/// Text form of a payment as entered at the boundary. Dates use ISO `YYYY-MM-DD`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionDraft {
    pub date: String,
    pub sme_id: String,
    pub amount_paid: String,
    pub collector_name: String,
}

impl TransactionDraft {
    pub fn new(
        date: impl Into<String>,
        sme_id: impl Into<String>,
        amount_paid: impl ToString,
        collector_name: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            sme_id: sme_id.into(),
            amount_paid: amount_paid.to_string(),
            collector_name: collector_name.into(),
        }
    }

    pub(crate) fn validate(&self) -> LedgerResult<PaymentFields> {
        let raw_date = require_text("Date", &self.date).map_err(LedgerError::Validation)?;
        let date = NaiveDate::parse_from_str(&raw_date, "%Y-%m-%d").map_err(|_| {
            LedgerError::Validation(format!("Date `{raw_date}` is not in YYYY-MM-DD form"))
        })?;
        let sme_id = require_text("SME id", &self.sme_id).map_err(LedgerError::Validation)?;
        let amount_paid =
            parse_amount("Amount paid", &self.amount_paid).map_err(LedgerError::Validation)?;
        if amount_paid <= 0.0 {
            return Err(LedgerError::validation("Amount paid must be positive"));
        }
        let collector_name =
            require_text("Collector name", &self.collector_name).map_err(LedgerError::Validation)?;
        Ok(PaymentFields {
            date,
            sme_id: SmeId::new(sme_id),
            amount_paid,
            collector_name,
        })
    }
}

pub(crate) struct PaymentFields {
    pub date: NaiveDate,
    pub sme_id: SmeId,
    pub amount_paid: f64,
    pub collector_name: String,
}

impl PaymentFields {
    pub fn into_transaction(self, receipt_id: ReceiptId) -> Transaction {
        Transaction {
            receipt_id,
            date: self.date,
            sme_id: self.sme_id,
            amount_paid: self.amount_paid,
            collector_name: self.collector_name,
        }
    }
}

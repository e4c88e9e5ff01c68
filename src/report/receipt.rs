use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{ReceiptId, SmeId, Transaction};
use crate::errors::{LedgerError, LedgerResult};
use crate::ledger::{LedgerStore, ProjectedSme};

/// Display-ready proof of payment for one logged transaction.
///
/// `balance` is the SME's balance in the projection the receipt was built
/// from, so it already reflects any payments logged after this one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub receipt_id: ReceiptId,
    pub date: NaiveDate,
    pub sme_id: SmeId,
    pub sme_name: String,
    pub collector_name: String,
    pub amount_paid: f64,
    pub balance: f64,
}

impl Receipt {
    pub fn new(txn: &Transaction, sme: &ProjectedSme) -> LedgerResult<Self> {
        if txn.sme_id != *sme.id() {
            return Err(LedgerError::Validation(format!(
                "receipt {} belongs to SME {}, not {}",
                txn.receipt_id,
                txn.sme_id,
                sme.id()
            )));
        }
        Ok(Self {
            receipt_id: txn.receipt_id.clone(),
            date: txn.date,
            sme_id: sme.id().clone(),
            sme_name: sme.sme().name.clone(),
            collector_name: txn.collector_name.clone(),
            amount_paid: txn.amount_paid,
            balance: sme.balance(),
        })
    }

    /// Looks up a receipt number in the log and builds its receipt against the
    /// live projection. Orphaned transactions have no SME to print and yield `NotFound`.
    pub fn for_receipt_id(store: &LedgerStore, receipt_id: &str) -> LedgerResult<Self> {
        let txn = store
            .transaction(receipt_id)
            .ok_or_else(|| LedgerError::NotFound(format!("receipt `{receipt_id}`")))?;
        let projection = store.project();
        let sme = projection.get(txn.sme_id.as_str()).ok_or_else(|| {
            LedgerError::NotFound(format!(
                "SME `{}` referenced by receipt `{}`",
                txn.sme_id, receipt_id
            ))
        })?;
        Self::new(txn, sme)
    }

    /// Name of the rendered document handed to the export collaborator.
    pub fn file_name(&self) -> String {
        format!("Receipt_{}.pdf", self.receipt_id)
    }
}

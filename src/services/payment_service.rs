//! Records payments and reports their effect on the SME's balance.

use crate::domain::{ReceiptId, TransactionDraft};
use crate::errors::LedgerResult;
use crate::ledger::LedgerStore;

/// Result of logging a payment, read from the projection taken right after the append.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentOutcome {
    pub receipt_id: ReceiptId,
    /// Remaining balance, or `None` when the payment names no registered SME.
    pub balance: Option<f64>,
    /// True when this payment moved the SME from active to paid off.
    pub paid_off: bool,
}

pub struct PaymentService;

impl PaymentService {
    pub fn record(store: &mut LedgerStore, draft: &TransactionDraft) -> LedgerResult<PaymentOutcome> {
        let sme_id = draft.sme_id.trim().to_string();
        let was_active = store
            .project()
            .get(&sme_id)
            .map(|entry| entry.is_active())
            .unwrap_or(false);

        let receipt_id = store.append_transaction(draft)?;

        let projection = store.project();
        let entry = projection.get(&sme_id);
        let paid_off = was_active && entry.is_some_and(|entry| !entry.is_active());
        if paid_off {
            tracing::info!(sme_id = %sme_id, receipt_id = %receipt_id, "SME has paid off their debt");
        }
        Ok(PaymentOutcome {
            receipt_id,
            balance: entry.map(|entry| entry.balance()),
            paid_off,
        })
    }
}

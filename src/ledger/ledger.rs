use serde::{Deserialize, Serialize};

use crate::domain::{
    find_by_id, ReceiptId, Sme, SmeDraft, SmeId, Transaction, TransactionDraft,
};
use crate::errors::{LedgerError, LedgerResult};

use super::projection::{project, Projection};

/// Single source of truth for the SME registry and the payment log.
///
/// Every mutation validates its input completely before touching state, so a
/// rejected call leaves the store exactly as it was. Payment totals, balances
/// and statuses are never stored here; call [`LedgerStore::project`] after a
/// mutation to obtain them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerStore {
    #[serde(default)]
    smes: Vec<Sme>,
    #[serde(default)]
    transactions: Vec<Transaction>,
}

impl LedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with the sample portfolio used for demos.
    pub fn with_demo_data() -> LedgerResult<Self> {
        let mut store = Self::new();
        for (name, phone, tool, cost, rate) in DEMO_SMES {
            store.add_sme(
                &SmeDraft::new(*name, *tool)
                    .phone(*phone)
                    .total_cost(cost)
                    .daily_rate(rate),
            )?;
        }
        Ok(store)
    }

    pub fn smes(&self) -> &[Sme] {
        &self.smes
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn sme(&self, id: &str) -> Option<&Sme> {
        find_by_id(&self.smes, id)
    }

    pub fn transaction(&self, receipt_id: &str) -> Option<&Transaction> {
        find_by_id(&self.transactions, receipt_id)
    }

    /// Log entries recorded against `sme_id`, whether or not that SME still exists.
    pub fn transactions_for<'a>(&'a self, sme_id: &'a str) -> impl Iterator<Item = &'a Transaction> {
        self.transactions
            .iter()
            .filter(move |txn| txn.sme_id.as_str() == sme_id)
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    /// Next id after the current numeric maximum; gaps left by deletions are not reused.
    pub fn next_id(&self) -> SmeId {
        let max = self
            .smes
            .iter()
            .filter_map(|sme| sme.id.sequence())
            .max()
            .unwrap_or(0);
        SmeId::from_sequence(max + 1)
    }

    pub fn next_receipt_id(&self) -> ReceiptId {
        ReceiptId::for_position(self.transactions.len())
    }

    pub fn add_sme(&mut self, draft: &SmeDraft) -> LedgerResult<SmeId> {
        let fields = draft.validate()?;
        let id = self.next_id();
        tracing::info!(sme_id = %id, name = fields.name(), "registered SME");
        self.smes.push(Sme::from_fields(id.clone(), fields));
        Ok(id)
    }

    /// Replaces the mutable fields of an existing SME. Id and payment history are untouched.
    pub fn update_sme(&mut self, id: &str, draft: &SmeDraft) -> LedgerResult<()> {
        let index = self.position(id)?;
        let fields = draft.validate()?;
        self.smes[index].apply(fields);
        tracing::info!(sme_id = id, "updated SME");
        Ok(())
    }

    /// Removes the SME and returns it. Its transactions stay in the log, unattributed.
    pub fn delete_sme(&mut self, id: &str) -> LedgerResult<Sme> {
        let index = self.position(id)?;
        let removed = self.smes.remove(index);
        let orphaned = self.transactions_for(id).count();
        if orphaned > 0 {
            tracing::warn!(sme_id = id, orphaned, "deleted SME with logged payments");
        } else {
            tracing::info!(sme_id = id, "deleted SME");
        }
        Ok(removed)
    }

    /// Appends a payment to the end of the log. The SME id is not checked
    /// against the registry; unknown ids simply never count toward a balance.
    pub fn append_transaction(&mut self, draft: &TransactionDraft) -> LedgerResult<ReceiptId> {
        let fields = draft.validate()?;
        let receipt_id = self.next_receipt_id();
        if self.sme(fields.sme_id.as_str()).is_none() {
            tracing::warn!(
                sme_id = %fields.sme_id,
                receipt_id = %receipt_id,
                "payment logged for unknown SME"
            );
        }
        let txn = fields.into_transaction(receipt_id.clone());
        tracing::info!(
            receipt_id = %receipt_id,
            sme_id = %txn.sme_id,
            amount = txn.amount_paid,
            "logged payment"
        );
        self.transactions.push(txn);
        Ok(receipt_id)
    }

    /// Recomputes payment totals, balances and statuses from the current state.
    pub fn project(&self) -> Projection {
        project(&self.smes, &self.transactions)
    }

    fn position(&self, id: &str) -> LedgerResult<usize> {
        self.smes
            .iter()
            .position(|sme| sme.id.as_str() == id)
            .ok_or_else(|| LedgerError::NotFound(format!("SME `{id}`")))
    }
}

const DEMO_SMES: &[(&str, &str, &str, f64, f64)] = &[
    ("Alpha Textiles", "555-0101", "Sewing Machine", 500.0, 10.0),
    ("Beta Carpentry", "555-0102", "Power Drill Set", 350.0, 15.0),
    ("Gamma Food", "555-0103", "Industrial Blender", 200.0, 5.0),
    ("Delta Repairs", "555-0104", "Welding Kit", 800.0, 20.0),
    ("Epsilon Crafts", "555-0105", "Sewing Machine", 500.0, 10.0),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str, cost: f64) -> SmeDraft {
        SmeDraft::new(name, "Sewing Machine")
            .phone("555-0100")
            .total_cost(cost)
            .daily_rate(10)
    }

    fn payment(sme_id: &str, amount: f64) -> TransactionDraft {
        TransactionDraft::new("2024-01-15", sme_id, amount, "Kofi")
    }

    #[test]
    fn ids_are_assigned_sequentially() {
        let mut store = LedgerStore::new();
        let ids: Vec<_> = (0..3)
            .map(|idx| store.add_sme(&draft(&format!("SME {idx}"), 100.0)).unwrap())
            .collect();
        assert_eq!(
            ids.iter().map(SmeId::as_str).collect::<Vec<_>>(),
            vec!["001", "002", "003"]
        );
    }

    #[test]
    fn rejected_add_leaves_registry_untouched() {
        let mut store = LedgerStore::new();
        let err = store
            .add_sme(&SmeDraft::new("", "Drill").total_cost(1).daily_rate(1))
            .expect_err("name is required");
        assert!(matches!(err, LedgerError::Validation(_)));
        assert!(store.smes().is_empty());
    }

    #[test]
    fn update_replaces_only_mutable_fields() {
        let mut store = LedgerStore::new();
        let id = store.add_sme(&draft("Alpha", 500.0)).unwrap();
        store.append_transaction(&payment(id.as_str(), 100.0)).unwrap();

        store
            .update_sme(id.as_str(), &draft("Alpha Renamed", 600.0))
            .unwrap();

        let sme = store.sme(id.as_str()).unwrap();
        assert_eq!(sme.id, id);
        assert_eq!(sme.name, "Alpha Renamed");
        assert_eq!(sme.total_cost, 600.0);
        assert_eq!(store.transactions_for(id.as_str()).count(), 1);
    }

    #[test]
    fn update_with_invalid_draft_keeps_previous_values() {
        let mut store = LedgerStore::new();
        let id = store.add_sme(&draft("Alpha", 500.0)).unwrap();
        let err = store
            .update_sme(id.as_str(), &draft("Alpha", 500.0).total_cost("lots"))
            .expect_err("cost must be numeric");
        assert!(matches!(err, LedgerError::Validation(_)));
        assert_eq!(store.sme(id.as_str()).unwrap().total_cost, 500.0);
    }

    #[test]
    fn delete_unknown_sme_is_not_found() {
        let mut store = LedgerStore::new();
        let err = store.delete_sme("404").expect_err("nothing to delete");
        assert!(matches!(err, LedgerError::NotFound(_)));
    }

    #[test]
    fn append_assigns_receipts_from_log_length() {
        let mut store = LedgerStore::new();
        let id = store.add_sme(&draft("Alpha", 500.0)).unwrap();
        let first = store.append_transaction(&payment(id.as_str(), 10.0)).unwrap();
        let second = store.append_transaction(&payment(id.as_str(), 10.0)).unwrap();
        assert_eq!(first.as_str(), "R-101");
        assert_eq!(second.as_str(), "R-102");
        assert_eq!(store.transactions()[1].receipt_id, second);
    }

    #[test]
    fn rejected_payment_does_not_consume_a_receipt_number() {
        let mut store = LedgerStore::new();
        assert!(store.append_transaction(&payment("001", -5.0)).is_err());
        assert_eq!(store.transaction_count(), 0);
        assert_eq!(store.next_receipt_id().as_str(), "R-101");
    }

    #[test]
    fn demo_data_seeds_five_active_smes() {
        let store = LedgerStore::with_demo_data().unwrap();
        assert_eq!(store.smes().len(), 5);
        assert_eq!(store.next_id().as_str(), "006");
        assert_eq!(store.sme("004").unwrap().name, "Delta Repairs");
    }
}

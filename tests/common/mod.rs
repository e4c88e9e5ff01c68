#![allow(dead_code)]

use sme_ledger::{
    domain::{ReceiptId, SmeDraft, SmeId, TransactionDraft},
    ledger::LedgerStore,
};

pub const EPSILON: f64 = 1e-9;

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPSILON,
        "expected {expected}, got {actual}"
    );
}

pub fn register(store: &mut LedgerStore, name: &str, tool: &str, cost: f64) -> SmeId {
    store
        .add_sme(&SmeDraft::new(name, tool).total_cost(cost).daily_rate(10))
        .expect("register sme")
}

pub fn pay(store: &mut LedgerStore, sme_id: &str, amount: f64) -> ReceiptId {
    store
        .append_transaction(&TransactionDraft::new("2024-03-01", sme_id, amount, "Kofi Mensah"))
        .expect("append payment")
}

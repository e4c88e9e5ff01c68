#![doc(test(attr(deny(warnings))))]

//! SME Ledger tracks small businesses that received a tool on credit, logs
//! their repayments, and derives each one's balance and repayment status.
//!
//! The [`ledger::LedgerStore`] owns the SME registry and the append-only
//! payment log. Balances are never stored; [`ledger::project`] recomputes
//! them from scratch whenever a view is needed. [`report`] turns a projection
//! into receipts and CSV rows for whatever renders them.

pub mod cli;
pub mod config;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod ledger;
pub mod report;
pub mod services;
pub mod utils;

pub use errors::{LedgerError, LedgerResult};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("SME Ledger tracing initialized.");
    });
}

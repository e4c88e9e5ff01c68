//! Ledger store, balance projection, and the shared single-writer handle.

#[allow(clippy::module_inception)]
pub mod ledger;
pub mod projection;
pub mod shared;

pub use ledger::LedgerStore;
pub use projection::{project, ProjectedSme, Projection, RepaymentStatus};
pub use shared::SharedLedger;

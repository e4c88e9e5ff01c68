//! Services layered over the ledger store and its projection.

pub mod payment_service;
pub mod search_service;
pub mod summary_service;

pub use payment_service::{PaymentOutcome, PaymentService};
pub use search_service::{LogEntry, SearchService};
pub use summary_service::{DashboardSummary, SummaryService, ToolCount};

pub mod common;
pub mod sme;
pub mod transaction;

pub use common::{find_by_id, Displayable, Identifiable};
pub use sme::{Sme, SmeDraft, SmeFields, SmeId};
pub use transaction::{ReceiptId, Transaction, TransactionDraft, RECEIPT_BASE};

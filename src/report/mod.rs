//! Display payloads built from a transaction or the projected registry:
//! receipts and master-list CSV rows.

pub mod export;
pub mod receipt;

pub use export::{export_file_name, sme_csv_string, write_sme_csv, SmeRecord, CSV_HEADER};
pub use receipt::Receipt;

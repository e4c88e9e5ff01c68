use crate::domain::Transaction;
use crate::ledger::{LedgerStore, ProjectedSme, Projection};

/// A log row joined with the name of the SME it was paid for, if that SME still exists.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogEntry<'a> {
    pub transaction: &'a Transaction,
    pub sme_name: Option<&'a str>,
}

impl LogEntry<'_> {
    pub fn sme_label(&self) -> &str {
        self.sme_name.unwrap_or("Unknown")
    }
}

pub struct SearchService;

impl SearchService {
    /// Master-list filter: name or tool (case-insensitive) or id substring.
    pub fn filter_smes<'a>(projection: &'a Projection, query: &str) -> Vec<&'a ProjectedSme> {
        let needle = query.trim().to_lowercase();
        projection
            .iter()
            .filter(|entry| {
                let sme = entry.sme();
                needle.is_empty()
                    || sme.name.to_lowercase().contains(&needle)
                    || sme.id.as_str().contains(query.trim())
                    || sme.tool_given.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// SMEs that can still receive payments.
    pub fn active_smes(projection: &Projection) -> Vec<&ProjectedSme> {
        projection.iter().filter(|entry| entry.is_active()).collect()
    }

    /// Daily-log search over receipt number, SME name and collector. Newest first.
    pub fn search_transactions<'a>(store: &'a LedgerStore, query: &str) -> Vec<LogEntry<'a>> {
        let needle = query.trim().to_lowercase();
        store
            .transactions()
            .iter()
            .rev()
            .map(|txn| LogEntry {
                transaction: txn,
                sme_name: store.sme(txn.sme_id.as_str()).map(|sme| sme.name.as_str()),
            })
            .filter(|entry| {
                if needle.is_empty() {
                    return true;
                }
                let haystack = format!(
                    "{} {} {}",
                    entry.transaction.receipt_id,
                    entry.sme_name.unwrap_or_default(),
                    entry.transaction.collector_name
                )
                .to_lowercase();
                haystack.contains(&needle)
            })
            .collect()
    }
}

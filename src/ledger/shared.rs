use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::errors::LedgerResult;

use super::{LedgerStore, Projection};

/// Thread-safe handle to a [`LedgerStore`].
///
/// Mutations are serialized behind the write lock. Readers either project
/// under the read lock or take an owned snapshot and project it elsewhere.
#[derive(Debug, Clone, Default)]
pub struct SharedLedger {
    inner: Arc<RwLock<LedgerStore>>,
}

impl SharedLedger {
    pub fn new(store: LedgerStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    /// Runs a mutation with exclusive access to the store.
    pub fn write<T>(&self, f: impl FnOnce(&mut LedgerStore) -> LedgerResult<T>) -> LedgerResult<T> {
        let mut guard = self.write_guard();
        f(&mut guard)
    }

    pub fn read<T>(&self, f: impl FnOnce(&LedgerStore) -> T) -> T {
        let guard = self.read_guard();
        f(&guard)
    }

    /// Owned copy of registry and log as of now. Project it with
    /// [`LedgerStore::project`] without holding the lock.
    pub fn snapshot(&self) -> LedgerStore {
        self.read_guard().clone()
    }

    /// Projects the current state while holding the read lock.
    pub fn project(&self) -> Projection {
        self.read(LedgerStore::project)
    }

    // Mutations never leave partial state behind, so a poisoned lock still
    // guards a consistent store.
    fn read_guard(&self) -> RwLockReadGuard<'_, LedgerStore> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_guard(&self) -> RwLockWriteGuard<'_, LedgerStore> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SmeDraft, TransactionDraft};
    use std::thread;

    #[test]
    fn concurrent_payments_are_serialized() {
        let shared = SharedLedger::default();
        let id = shared
            .write(|store| store.add_sme(&SmeDraft::new("Alpha", "Kiln").total_cost(1000).daily_rate(5)))
            .unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let shared = shared.clone();
                let id = id.to_string();
                thread::spawn(move || {
                    for _ in 0..10 {
                        shared
                            .write(|store| {
                                store.append_transaction(&TransactionDraft::new(
                                    "2024-05-01",
                                    id.as_str(),
                                    1,
                                    "Yaw",
                                ))
                            })
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let snapshot = shared.snapshot();
        assert_eq!(snapshot.transaction_count(), 80);
        assert_eq!(snapshot.next_receipt_id().as_str(), "R-181");
        assert_eq!(shared.project().get(id.as_str()).unwrap().total_paid(), 80.0);
    }

    #[test]
    fn snapshot_is_detached_from_later_writes() {
        let shared = SharedLedger::new(LedgerStore::with_demo_data().unwrap());
        let before = shared.snapshot();
        shared.write(|store| store.delete_sme("001").map(|_| ())).unwrap();
        assert_eq!(before.smes().len(), 5);
        assert_eq!(shared.project().len(), 4);
    }

    #[test]
    fn locked_and_snapshot_projections_agree() {
        let shared = SharedLedger::new(LedgerStore::with_demo_data().unwrap());
        shared
            .write(|store| store.append_transaction(&TransactionDraft::new("2024-05-02", "002", 75, "Efua")))
            .unwrap();

        let locked = shared.project();
        let detached = thread::spawn({
            let snapshot = shared.snapshot();
            move || snapshot.project()
        })
        .join()
        .unwrap();
        assert_eq!(locked.get("002").unwrap().total_paid(), 75.0);
        assert_eq!(locked, detached);
    }
}

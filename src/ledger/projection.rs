//! Balance projection: derives payment totals and repayment status from the
//! registry and the payment log. Pure and recomputed on every call.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::domain::{Sme, SmeId, Transaction};

/// Repayment state of an SME, a function of its balance alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RepaymentStatus {
    Active,
    PaidOff,
}

impl RepaymentStatus {
    pub fn from_balance(balance: f64) -> Self {
        if balance <= 0.0 {
            RepaymentStatus::PaidOff
        } else {
            RepaymentStatus::Active
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RepaymentStatus::Active => "Active",
            RepaymentStatus::PaidOff => "Paid Off",
        }
    }
}

impl fmt::Display for RepaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Computed view of one SME. Only [`project`] builds these.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectedSme {
    #[serde(flatten)]
    sme: Sme,
    total_paid: f64,
    balance: f64,
    status: RepaymentStatus,
}

impl ProjectedSme {
    fn new(sme: &Sme, total_paid: f64) -> Self {
        let balance = (sme.total_cost - total_paid).max(0.0);
        Self {
            sme: sme.clone(),
            total_paid,
            balance,
            status: RepaymentStatus::from_balance(balance),
        }
    }

    pub fn sme(&self) -> &Sme {
        &self.sme
    }

    pub fn id(&self) -> &SmeId {
        &self.sme.id
    }

    pub fn total_paid(&self) -> f64 {
        self.total_paid
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn status(&self) -> RepaymentStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == RepaymentStatus::Active
    }

    /// Share of the cost already repaid, in percent, capped at 100.
    pub fn progress(&self) -> f64 {
        if self.sme.total_cost <= 0.0 {
            return 100.0;
        }
        (self.total_paid / self.sme.total_cost * 100.0).min(100.0)
    }
}

/// Projected view of the whole registry, in registry order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Projection {
    entries: Vec<ProjectedSme>,
}

impl Projection {
    pub fn get(&self, id: &str) -> Option<&ProjectedSme> {
        self.entries.iter().find(|entry| entry.id().as_str() == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProjectedSme> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn as_slice(&self) -> &[ProjectedSme] {
        &self.entries
    }
}

impl<'a> IntoIterator for &'a Projection {
    type Item = &'a ProjectedSme;
    type IntoIter = std::slice::Iter<'a, ProjectedSme>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Projects every registered SME against the log.
///
/// Payments are summed per SME in log order after a single pass that indexes
/// the log by `smeId`. Entries whose `smeId` matches no registered SME are
/// skipped without error.
pub fn project(smes: &[Sme], log: &[Transaction]) -> Projection {
    let mut paid: HashMap<&str, f64> = HashMap::with_capacity(smes.len());
    for txn in log {
        *paid.entry(txn.sme_id.as_str()).or_insert(0.0) += txn.amount_paid;
    }

    let entries = smes
        .iter()
        .map(|sme| {
            let total_paid = paid.get(sme.id.as_str()).copied().unwrap_or(0.0);
            ProjectedSme::new(sme, total_paid)
        })
        .collect();

    tracing::debug!(smes = smes.len(), transactions = log.len(), "projected ledger");
    Projection { entries }
}

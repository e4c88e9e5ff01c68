use serde::Serialize;

use crate::ledger::{Projection, RepaymentStatus};

/// Portfolio-level figures shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_smes: usize,
    pub active_smes: usize,
    pub paid_off_smes: usize,
    pub total_portfolio: f64,
    pub total_collected: f64,
    /// Portfolio minus collections. Overpayments reduce this figure.
    pub outstanding: f64,
    /// Sum of per-SME balances, each floored at zero.
    pub balance_due: f64,
    pub tool_distribution: Vec<ToolCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolCount {
    pub tool: String,
    pub count: usize,
}

pub struct SummaryService;

impl SummaryService {
    pub fn dashboard(projection: &Projection) -> DashboardSummary {
        let mut summary = DashboardSummary {
            total_smes: projection.len(),
            active_smes: 0,
            paid_off_smes: 0,
            total_portfolio: 0.0,
            total_collected: 0.0,
            outstanding: 0.0,
            balance_due: 0.0,
            tool_distribution: Vec::new(),
        };

        for entry in projection {
            match entry.status() {
                RepaymentStatus::Active => summary.active_smes += 1,
                RepaymentStatus::PaidOff => summary.paid_off_smes += 1,
            }
            summary.total_portfolio += entry.sme().total_cost;
            summary.total_collected += entry.total_paid();
            summary.balance_due += entry.balance();
        }
        summary.outstanding = summary.total_portfolio - summary.total_collected;
        summary.tool_distribution = Self::tool_distribution(projection);
        summary
    }

    /// Counts SMEs per tool, in the order each tool first appears.
    pub fn tool_distribution(projection: &Projection) -> Vec<ToolCount> {
        let mut counts: Vec<ToolCount> = Vec::new();
        for entry in projection {
            let tool = &entry.sme().tool_given;
            match counts.iter_mut().find(|existing| &existing.tool == tool) {
                Some(existing) => existing.count += 1,
                None => counts.push(ToolCount {
                    tool: tool.clone(),
                    count: 1,
                }),
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{SmeDraft, TransactionDraft};
    use crate::ledger::LedgerStore;

    #[test]
    fn dashboard_aggregates_demo_portfolio() {
        let mut store = LedgerStore::with_demo_data().unwrap();
        store
            .append_transaction(&TransactionDraft::new("2024-01-05", "003", 250, "Ama"))
            .unwrap();
        store
            .append_transaction(&TransactionDraft::new("2024-01-05", "001", 100, "Ama"))
            .unwrap();

        let summary = SummaryService::dashboard(&store.project());
        assert_eq!(summary.total_smes, 5);
        assert_eq!(summary.active_smes, 4);
        assert_eq!(summary.paid_off_smes, 1);
        assert_eq!(summary.total_portfolio, 2350.0);
        assert_eq!(summary.total_collected, 350.0);
        assert_eq!(summary.outstanding, 2000.0);
        // 003 is overpaid by 50; its balance floors at zero.
        assert_eq!(summary.balance_due, 2050.0);
    }

    #[test]
    fn tool_distribution_keeps_first_seen_order() {
        let store = LedgerStore::with_demo_data().unwrap();
        let tools = SummaryService::tool_distribution(&store.project());
        assert_eq!(tools[0], ToolCount { tool: "Sewing Machine".into(), count: 2 });
        assert_eq!(tools.len(), 4);
        assert_eq!(tools[3].tool, "Welding Kit");
    }

    #[test]
    fn empty_ledger_has_zeroed_summary() {
        let summary = SummaryService::dashboard(&LedgerStore::new().project());
        assert_eq!(summary.total_smes, 0);
        assert!(summary.tool_distribution.is_empty());
        assert_eq!(summary.outstanding, 0.0);
        assert_eq!(summary.balance_due, 0.0);
    }

    #[test]
    fn outstanding_can_go_negative_when_everything_is_overpaid() {
        let mut store = LedgerStore::new();
        store
            .add_sme(&SmeDraft::new("Zeta Bakery", "Oven").total_cost(100).daily_rate(5))
            .unwrap();
        store
            .append_transaction(&TransactionDraft::new("2024-02-01", "001", 130, "Kojo"))
            .unwrap();

        let summary = SummaryService::dashboard(&store.project());
        assert_eq!(summary.outstanding, -30.0);
        assert_eq!(summary.balance_due, 0.0);
        assert_eq!(summary.paid_off_smes, 1);
    }
}

//! Read-only aggregates consumed by dashboards and reports.
//!
//! Callers must run a recalculation (any service mutation does) before
//! reading these; the aggregates trust the derived fields as-is.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::currency::{from_minor_units, to_minor_units};
use crate::dataset::Dataset;
use crate::domain::{MovementKind, Period, Priority, Settlement, Transaction};

/// Aggregated totals for one billing period.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodSummary {
    pub income_total: f64,
    pub expense_total: f64,
    pub balance: f64,
    pub settled_total: f64,
    pub pending_total: f64,
}

pub struct SummaryService;

impl SummaryService {
    /// Income, expense, and settlement totals for the given period.
    pub fn period_summary(dataset: &Dataset, period: Period) -> PeriodSummary {
        let mut income = 0i64;
        let mut expense = 0i64;
        let mut settled = 0i64;
        let mut pending = 0i64;

        for txn in dataset.transactions.iter().filter(|t| t.period == period) {
            let amount = to_minor_units(txn.amount);
            match txn.kind {
                MovementKind::Income => income += amount,
                MovementKind::Expense => {
                    expense += amount;
                    match txn.status {
                        Settlement::Paid => settled += amount,
                        Settlement::Pending => pending += amount,
                    }
                }
            }
        }

        PeriodSummary {
            income_total: from_minor_units(income),
            expense_total: from_minor_units(expense),
            balance: from_minor_units(income - expense),
            settled_total: from_minor_units(settled),
            pending_total: from_minor_units(pending),
        }
    }

    /// Pending expenses worth surfacing: overdue high-priority entries plus
    /// anything still due after `today`, soonest due date first, capped at
    /// `limit`.
    pub fn upcoming_dues(dataset: &Dataset, today: NaiveDate, limit: usize) -> Vec<&Transaction> {
        let mut dues: Vec<&Transaction> = dataset
            .transactions
            .iter()
            .filter(|txn| txn.is_expense() && txn.status == Settlement::Pending)
            .filter(|txn| match txn.due_date {
                Some(due) => due > today || txn.priority == Some(Priority::High),
                None => false,
            })
            .collect();
        dues.sort_by_key(|txn| txn.due_date);
        dues.truncate(limit);
        dues
    }

    /// Expense totals rolled up from concept to category name.
    pub fn expenses_by_category(dataset: &Dataset) -> BTreeMap<String, f64> {
        let mut totals: BTreeMap<String, i64> = BTreeMap::new();
        for txn in dataset.transactions.iter().filter(|t| t.is_expense()) {
            if let Some(concept) = dataset.concept(txn.concept) {
                if let Some(category) = dataset.category(concept.category) {
                    *totals.entry(category.name.clone()).or_insert(0) +=
                        to_minor_units(txn.amount);
                }
            }
        }
        totals
            .into_iter()
            .map(|(name, minor)| (name, from_minor_units(minor)))
            .collect()
    }
}

//! The full recalculation pass over a dataset.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::dataset::Dataset;
use crate::domain::{MovementKind, Transaction};
use crate::errors::DatasetError;

use super::{cycle, installments, priority, reconcile::PaymentIndex};

/// Outcome of one recalculation pass.
#[derive(Debug, Default)]
pub struct RecalcReport {
    pub processed: usize,
    pub issues: Vec<RecalcIssue>,
}

/// A transaction whose derived fields could not be computed this pass.
#[derive(Debug)]
pub struct RecalcIssue {
    pub transaction: Uuid,
    pub error: DatasetError,
}

/// Re-derives cycle dates, installment count, priority, and settlement
/// status for every transaction, in one synchronous sweep.
///
/// Expenses get the full derivation; income entries have their cycle fields
/// cleared. A record with invalid cycle inputs keeps cleared derived fields
/// and lands in the report; the rest of the pass continues. Settlement runs
/// for every transaction against a payment index built once up front.
/// Persisting the mutated dataset stays with the caller.
pub fn recalculate(dataset: &mut Dataset, today: NaiveDate) -> RecalcReport {
    let index = PaymentIndex::build(&dataset.payments);
    let mut report = RecalcReport::default();

    for txn in &mut dataset.transactions {
        match txn.kind {
            MovementKind::Expense => {
                if let Err(error) = derive_expense(txn, today) {
                    txn.clear_derived();
                    report.issues.push(RecalcIssue {
                        transaction: txn.id,
                        error,
                    });
                }
            }
            MovementKind::Income => txn.clear_derived(),
        }
        txn.status = index.settle(txn.concept, txn.amount);
        report.processed += 1;
    }

    dataset.touch();
    tracing::debug!(
        transactions = report.processed,
        issues = report.issues.len(),
        "recalculation pass finished"
    );
    report
}

fn derive_expense(txn: &mut Transaction, today: NaiveDate) -> Result<(), DatasetError> {
    // A missing anchor day reads as zero and fails the range check.
    let cutoff_day = txn.cutoff_day.unwrap_or(0);
    let due_day = txn.due_day.unwrap_or(0);
    let dates = cycle::cycle_dates(cutoff_day, due_day, txn.period)?;

    txn.cutoff_date = Some(dates.cutoff);
    txn.due_date = Some(dates.due);
    let windows = installments::count(today, dates.due);
    txn.installments = Some(windows);
    txn.priority = Some(priority::classify(windows));
    Ok(())
}

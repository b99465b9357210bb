//! Business logic helpers for managing transactions.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::core::services::{ServiceError, ServiceResult};
use crate::dataset::Dataset;
use crate::domain::Transaction;
use crate::engine;
use crate::errors::DatasetError;

/// Validated CRUD helpers for transactions. Every mutation ends with a full
/// recalculation pass so no reader ever sees stale derived fields.
pub struct TransactionService;

impl TransactionService {
    /// Adds a new transaction after checking its references, and returns its
    /// identifier.
    pub fn add(
        dataset: &mut Dataset,
        transaction: Transaction,
        today: NaiveDate,
    ) -> ServiceResult<Uuid> {
        Self::check_refs(dataset, &transaction)?;
        let id = dataset.add_transaction(transaction);
        engine::recalculate(dataset, today);
        Ok(id)
    }

    /// Updates the transaction identified by `id` via the provided mutator.
    pub fn update<F>(
        dataset: &mut Dataset,
        id: Uuid,
        mutator: F,
        today: NaiveDate,
    ) -> ServiceResult<()>
    where
        F: FnOnce(&mut Transaction),
    {
        let txn = dataset
            .transaction_mut(id)
            .ok_or_else(|| ServiceError::Invalid("Transaction not found".into()))?;
        mutator(txn);
        engine::recalculate(dataset, today);
        Ok(())
    }

    /// Removes the transaction identified by `id`, returning the removed
    /// instance.
    pub fn remove(dataset: &mut Dataset, id: Uuid, today: NaiveDate) -> ServiceResult<Transaction> {
        let removed = dataset
            .remove_transaction(id)
            .ok_or_else(|| ServiceError::Invalid("Transaction not found".into()))?;
        engine::recalculate(dataset, today);
        Ok(removed)
    }

    /// Returns a snapshot of the dataset's transactions.
    pub fn list(dataset: &Dataset) -> Vec<&Transaction> {
        dataset.transactions.iter().collect()
    }

    fn check_refs(dataset: &Dataset, transaction: &Transaction) -> ServiceResult<()> {
        if dataset.cost_type(transaction.cost_type).is_none() {
            return Err(ServiceError::Dataset(DatasetError::MissingRef(format!(
                "cost type {}",
                transaction.cost_type
            ))));
        }
        if dataset.concept(transaction.concept).is_none() {
            return Err(ServiceError::Dataset(DatasetError::MissingRef(format!(
                "concept {}",
                transaction.concept
            ))));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, Concept, CostType, MovementKind, Period, Priority};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn dataset_with_chain() -> (Dataset, Uuid, Uuid) {
        let mut dataset = Dataset::new("Txn");
        let cost_type = dataset.add_cost_type(CostType::new("Fixed", MovementKind::Expense));
        let category =
            dataset.add_category(Category::new("Housing", MovementKind::Expense, cost_type));
        let concept = dataset.add_concept(Concept::new(
            "Rent",
            MovementKind::Expense,
            cost_type,
            category,
        ));
        (dataset, cost_type, concept)
    }

    #[test]
    fn add_recalculates_derived_fields() {
        let (mut dataset, cost_type, concept) = dataset_with_chain();
        let txn = Transaction::expense(
            today(),
            cost_type,
            concept,
            900.0,
            Period::new(2024, 3),
            20,
            10,
        );
        let id = TransactionService::add(&mut dataset, txn, today()).expect("add transaction");

        let stored = dataset.transaction(id).expect("stored transaction");
        assert_eq!(stored.installments, Some(2));
        assert_eq!(stored.priority, Some(Priority::Medium));
    }

    #[test]
    fn add_rejects_unknown_references() {
        let (mut dataset, cost_type, _) = dataset_with_chain();
        let txn = Transaction::expense(
            today(),
            cost_type,
            Uuid::new_v4(),
            900.0,
            Period::new(2024, 3),
            20,
            10,
        );
        let err = TransactionService::add(&mut dataset, txn, today())
            .expect_err("unknown concept must fail");
        assert!(
            matches!(
                err,
                ServiceError::Dataset(DatasetError::MissingRef(ref message))
                    if message.starts_with("concept")
            ),
            "unexpected error: {err:?}"
        );
        assert_eq!(dataset.transaction_count(), 0);
    }

    #[test]
    fn update_fails_for_missing_transaction() {
        let (mut dataset, _, _) = dataset_with_chain();
        let err = TransactionService::update(&mut dataset, Uuid::new_v4(), |_| {}, today())
            .expect_err("update must fail for unknown id");
        assert!(
            matches!(err, ServiceError::Invalid(ref message) if message.contains("not found")),
            "unexpected error: {err:?}"
        );
    }

    #[test]
    fn update_rederives_after_cycle_change() {
        let (mut dataset, cost_type, concept) = dataset_with_chain();
        let txn = Transaction::expense(
            today(),
            cost_type,
            concept,
            900.0,
            Period::new(2024, 3),
            20,
            10,
        );
        let id = TransactionService::add(&mut dataset, txn, today()).unwrap();

        TransactionService::update(
            &mut dataset,
            id,
            |txn| {
                txn.cutoff_day = Some(5);
                txn.due_day = Some(10);
            },
            today(),
        )
        .expect("update transaction");

        let stored = dataset.transaction(id).expect("stored transaction");
        assert_eq!(
            stored.due_date,
            NaiveDate::from_ymd_opt(2024, 3, 10),
            "due date must follow the new cycle days"
        );
        assert_eq!(stored.priority, Some(Priority::High));
    }

    #[test]
    fn remove_returns_deleted_transaction() {
        let (mut dataset, cost_type, concept) = dataset_with_chain();
        let txn = Transaction::expense(
            today(),
            cost_type,
            concept,
            900.0,
            Period::new(2024, 3),
            20,
            10,
        );
        let id = TransactionService::add(&mut dataset, txn, today()).unwrap();

        let removed = TransactionService::remove(&mut dataset, id, today()).unwrap();
        assert_eq!(removed.id, id);
        assert!(dataset.transaction(id).is_none());
    }
}

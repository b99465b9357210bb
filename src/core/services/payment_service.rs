//! Business logic helpers for recording payments.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::core::services::{ServiceError, ServiceResult};
use crate::dataset::Dataset;
use crate::domain::Payment;
use crate::engine;
use crate::errors::DatasetError;

/// Validated helpers for the payment pool. Settlement status is pooled by
/// concept, so every mutation re-runs reconciliation for the whole dataset.
pub struct PaymentService;

impl PaymentService {
    /// Records a payment against a concept's pool and returns its identifier.
    pub fn record(dataset: &mut Dataset, payment: Payment, today: NaiveDate) -> ServiceResult<Uuid> {
        if dataset.concept(payment.concept).is_none() {
            return Err(ServiceError::Dataset(DatasetError::MissingRef(format!(
                "concept {}",
                payment.concept
            ))));
        }
        let id = dataset.add_payment(payment);
        engine::recalculate(dataset, today);
        Ok(id)
    }

    /// Removes the payment identified by `id`, returning the removed
    /// instance.
    pub fn remove(dataset: &mut Dataset, id: Uuid, today: NaiveDate) -> ServiceResult<Payment> {
        let removed = dataset
            .remove_payment(id)
            .ok_or_else(|| ServiceError::Invalid("Payment not found".into()))?;
        engine::recalculate(dataset, today);
        Ok(removed)
    }

    /// Returns a snapshot of the dataset's payments.
    pub fn list(dataset: &Dataset) -> Vec<&Payment> {
        dataset.payments.iter().collect()
    }
}

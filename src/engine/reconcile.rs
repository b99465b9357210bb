//! Settlement status derivation from the payment pool.

use std::collections::HashMap;

use uuid::Uuid;

use crate::currency::to_minor_units;
use crate::domain::{Payment, Settlement};

/// Concept-keyed payment totals in minor units, built once per pass so
/// reconciling each transaction is a single lookup.
#[derive(Debug, Default)]
pub struct PaymentIndex {
    totals: HashMap<Uuid, i64>,
}

impl PaymentIndex {
    pub fn build(payments: &[Payment]) -> Self {
        let mut totals: HashMap<Uuid, i64> = HashMap::new();
        for payment in payments {
            *totals.entry(payment.concept).or_insert(0) += to_minor_units(payment.amount);
        }
        Self { totals }
    }

    /// Total paid into a concept's pool, zero when nothing was recorded.
    pub fn total_for(&self, concept: Uuid) -> i64 {
        self.totals.get(&concept).copied().unwrap_or(0)
    }

    /// Paid only when the pooled payments match the amount exactly; any
    /// shortfall or overshoot leaves the transaction pending.
    pub fn settle(&self, concept: Uuid, amount: f64) -> Settlement {
        if self.total_for(concept) == to_minor_units(amount) {
            Settlement::Paid
        } else {
            Settlement::Pending
        }
    }
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::common::Identifiable;

/// A payment made against a concept's pool.
///
/// Payments reference the concept, not an individual transaction; every
/// transaction sharing the concept settles against the same pooled total.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Payment {
    pub id: Uuid,
    pub concept: Uuid,
    pub amount: f64,
    pub date: NaiveDate,
}

impl Payment {
    pub fn new(concept: Uuid, amount: f64, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            concept,
            amount,
            date,
        }
    }
}

impl Identifiable for Payment {
    fn id(&self) -> Uuid {
        self.id
    }
}

//! Referential-integrity checks over a dataset.
//!
//! Master-data deletions cascade through these functions: each returns the
//! set of affected identifiers so the caller decides what to drop, keeping
//! the checks testable without any deletion flow attached.

use std::collections::HashSet;

use uuid::Uuid;

use super::Dataset;

impl Dataset {
    /// Transactions whose classification chain no longer resolves: the
    /// concept is gone, the concept's category is gone, or an assigned
    /// subcategory is gone.
    pub fn transactions_with_broken_refs(&self) -> Vec<Uuid> {
        let category_ids: HashSet<Uuid> = self.categories.iter().map(|c| c.id).collect();
        let subcategory_ids: HashSet<Uuid> = self.subcategories.iter().map(|s| s.id).collect();

        self.transactions
            .iter()
            .filter(|txn| {
                let concept = match self.concept(txn.concept) {
                    Some(concept) => concept,
                    None => return true,
                };
                if !category_ids.contains(&concept.category) {
                    return true;
                }
                match concept.subcategory {
                    Some(sub) => !subcategory_ids.contains(&sub),
                    None => false,
                }
            })
            .map(|txn| txn.id)
            .collect()
    }

    /// Transactions that directly reference the given cost type.
    pub fn transactions_referencing_cost_type(&self, cost_type: Uuid) -> Vec<Uuid> {
        self.transactions
            .iter()
            .filter(|txn| txn.cost_type == cost_type)
            .map(|txn| txn.id)
            .collect()
    }

    /// Transactions that directly reference the given concept.
    pub fn transactions_referencing_concept(&self, concept: Uuid) -> Vec<Uuid> {
        self.transactions
            .iter()
            .filter(|txn| txn.concept == concept)
            .map(|txn| txn.id)
            .collect()
    }

    /// Payments pooled under the given concept.
    pub fn payments_referencing_concept(&self, concept: Uuid) -> Vec<Uuid> {
        self.payments
            .iter()
            .filter(|payment| payment.concept == concept)
            .map(|payment| payment.id)
            .collect()
    }

    /// Concepts whose payment pool is shared by more than one transaction.
    /// Settlement is pooled per concept, so these transactions settle (or
    /// not) together.
    pub fn shared_payment_pools(&self) -> Vec<Uuid> {
        let mut counts: Vec<(Uuid, usize)> = Vec::new();
        for txn in &self.transactions {
            match counts.iter_mut().find(|(id, _)| *id == txn.concept) {
                Some((_, count)) => *count += 1,
                None => counts.push((txn.concept, 1)),
            }
        }
        counts
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(id, _)| id)
            .collect()
    }
}

/// Human-readable warnings for dangling references, surfaced when a dataset
/// is opened.
pub fn dataset_warnings(dataset: &Dataset) -> Vec<String> {
    let cost_type_ids: HashSet<Uuid> = dataset.cost_types.iter().map(|ct| ct.id).collect();
    let concept_ids: HashSet<Uuid> = dataset.concepts.iter().map(|c| c.id).collect();
    let mut warnings = Vec::new();

    for txn in &dataset.transactions {
        if !cost_type_ids.contains(&txn.cost_type) {
            warnings.push(format!(
                "transaction {} references unknown cost type {}",
                txn.id, txn.cost_type
            ));
        }
        if !concept_ids.contains(&txn.concept) {
            warnings.push(format!(
                "transaction {} references unknown concept {}",
                txn.id, txn.concept
            ));
        }
    }
    for payment in &dataset.payments {
        if !concept_ids.contains(&payment.concept) {
            warnings.push(format!(
                "payment {} references unknown concept {}",
                payment.id, payment.concept
            ));
        }
    }
    warnings
}

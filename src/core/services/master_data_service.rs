//! Business logic helpers for the master-data collections.
//!
//! Deletions cascade: a removed record orphans the transactions that
//! reference it (directly or through the concept chain), those transactions
//! are dropped along with any payments pooled under a deleted concept, and
//! the pass ends with a recalculation so the surviving records are fresh.

use std::collections::HashSet;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::core::services::{ServiceError, ServiceResult};
use crate::dataset::Dataset;
use crate::domain::{Category, Concept, CostType, NamedEntity, SubCategory};
use crate::engine;
use crate::errors::DatasetError;

pub struct MasterDataService;

impl MasterDataService {
    pub fn add_cost_type(dataset: &mut Dataset, cost_type: CostType) -> ServiceResult<Uuid> {
        ensure_unique_name(&dataset.cost_types, cost_type.name())?;
        Ok(dataset.add_cost_type(cost_type))
    }

    pub fn add_category(dataset: &mut Dataset, category: Category) -> ServiceResult<Uuid> {
        ensure_unique_name(&dataset.categories, category.name())?;
        if dataset.cost_type(category.cost_type).is_none() {
            return Err(missing_ref("cost type", category.cost_type));
        }
        Ok(dataset.add_category(category))
    }

    pub fn add_subcategory(dataset: &mut Dataset, subcategory: SubCategory) -> ServiceResult<Uuid> {
        ensure_unique_name(&dataset.subcategories, subcategory.name())?;
        if dataset.cost_type(subcategory.cost_type).is_none() {
            return Err(missing_ref("cost type", subcategory.cost_type));
        }
        if dataset.category(subcategory.category).is_none() {
            return Err(missing_ref("category", subcategory.category));
        }
        Ok(dataset.add_subcategory(subcategory))
    }

    pub fn add_concept(dataset: &mut Dataset, concept: Concept) -> ServiceResult<Uuid> {
        ensure_unique_name(&dataset.concepts, concept.name())?;
        if dataset.cost_type(concept.cost_type).is_none() {
            return Err(missing_ref("cost type", concept.cost_type));
        }
        if dataset.category(concept.category).is_none() {
            return Err(missing_ref("category", concept.category));
        }
        if let Some(sub) = concept.subcategory {
            if dataset.subcategory(sub).is_none() {
                return Err(missing_ref("subcategory", sub));
            }
        }
        Ok(dataset.add_concept(concept))
    }

    /// Removes a cost type together with the transactions that reference it.
    pub fn remove_cost_type(
        dataset: &mut Dataset,
        id: Uuid,
        today: NaiveDate,
    ) -> ServiceResult<CostType> {
        let removed = dataset
            .remove_cost_type(id)
            .ok_or_else(|| ServiceError::Invalid("Cost type not found".into()))?;
        let direct: HashSet<Uuid> = dataset
            .transactions_referencing_cost_type(id)
            .into_iter()
            .collect();
        dataset.transactions.retain(|txn| !direct.contains(&txn.id));
        prune_broken_transactions(dataset);
        engine::recalculate(dataset, today);
        Ok(removed)
    }

    /// Removes a category; transactions whose concept chain now dangles go
    /// with it.
    pub fn remove_category(
        dataset: &mut Dataset,
        id: Uuid,
        today: NaiveDate,
    ) -> ServiceResult<Category> {
        let removed = dataset
            .remove_category(id)
            .ok_or_else(|| ServiceError::Invalid("Category not found".into()))?;
        prune_broken_transactions(dataset);
        engine::recalculate(dataset, today);
        Ok(removed)
    }

    pub fn remove_subcategory(
        dataset: &mut Dataset,
        id: Uuid,
        today: NaiveDate,
    ) -> ServiceResult<SubCategory> {
        let removed = dataset
            .remove_subcategory(id)
            .ok_or_else(|| ServiceError::Invalid("Subcategory not found".into()))?;
        prune_broken_transactions(dataset);
        engine::recalculate(dataset, today);
        Ok(removed)
    }

    /// Removes a concept along with its transactions and pooled payments.
    pub fn remove_concept(
        dataset: &mut Dataset,
        id: Uuid,
        today: NaiveDate,
    ) -> ServiceResult<Concept> {
        let removed = dataset
            .remove_concept(id)
            .ok_or_else(|| ServiceError::Invalid("Concept not found".into()))?;
        let orphaned: HashSet<Uuid> = dataset
            .payments_referencing_concept(id)
            .into_iter()
            .collect();
        dataset
            .payments
            .retain(|payment| !orphaned.contains(&payment.id));
        prune_broken_transactions(dataset);
        engine::recalculate(dataset, today);
        Ok(removed)
    }

    /// Updates the concept identified by `id` via the provided mutator, then
    /// recalculates since classification feeds reconciliation and summaries.
    pub fn update_concept<F>(
        dataset: &mut Dataset,
        id: Uuid,
        mutator: F,
        today: NaiveDate,
    ) -> ServiceResult<()>
    where
        F: FnOnce(&mut Concept),
    {
        let concept = dataset
            .concepts
            .iter_mut()
            .find(|concept| concept.id == id)
            .ok_or_else(|| ServiceError::Invalid("Concept not found".into()))?;
        mutator(concept);
        dataset.touch();
        engine::recalculate(dataset, today);
        Ok(())
    }
}

fn prune_broken_transactions(dataset: &mut Dataset) {
    let broken: HashSet<Uuid> = dataset.transactions_with_broken_refs().into_iter().collect();
    if broken.is_empty() {
        return;
    }
    tracing::info!(count = broken.len(), "dropping transactions with broken references");
    dataset.transactions.retain(|txn| !broken.contains(&txn.id));
    dataset.touch();
}

fn ensure_unique_name<T: NamedEntity>(items: &[T], name: &str) -> ServiceResult<()> {
    if items
        .iter()
        .any(|item| item.name().eq_ignore_ascii_case(name))
    {
        return Err(ServiceError::Invalid(format!(
            "name `{name}` is already in use"
        )));
    }
    Ok(())
}

fn missing_ref(what: &str, id: Uuid) -> ServiceError {
    ServiceError::Dataset(DatasetError::MissingRef(format!("{what} {id}")))
}

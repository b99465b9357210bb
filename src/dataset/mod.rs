//! The owning aggregate for master data, transactions, and payments.

pub mod integrity;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    Category, Concept, CostType, Identifiable, MovementKind, Payment, SubCategory, Transaction,
};

pub const CURRENT_SCHEMA_VERSION: u8 = 1;

/// Everything the tracker knows, in one serializable unit. The engine mutates
/// only derived transaction fields; services own all other mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    pub name: String,
    #[serde(default)]
    pub cost_types: Vec<CostType>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub subcategories: Vec<SubCategory>,
    #[serde(default)]
    pub concepts: Vec<Concept>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub payments: Vec<Payment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "Dataset::schema_version_default")]
    pub schema_version: u8,
}

impl Dataset {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            cost_types: Vec::new(),
            categories: Vec::new(),
            subcategories: Vec::new(),
            concepts: Vec::new(),
            transactions: Vec::new(),
            payments: Vec::new(),
            created_at: now,
            updated_at: now,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    /// A fresh dataset pre-populated with the starter cost types.
    pub fn seeded(name: impl Into<String>) -> Self {
        let mut dataset = Self::new(name);
        dataset.cost_types = vec![
            CostType::new("Fixed", MovementKind::Expense),
            CostType::new("Variable", MovementKind::Expense),
            CostType::new("Recurring", MovementKind::Income),
            CostType::new("One-time", MovementKind::Income),
        ];
        dataset
    }

    pub fn add_cost_type(&mut self, cost_type: CostType) -> Uuid {
        let id = cost_type.id;
        self.cost_types.push(cost_type);
        self.touch();
        id
    }

    pub fn add_category(&mut self, category: Category) -> Uuid {
        let id = category.id;
        self.categories.push(category);
        self.touch();
        id
    }

    pub fn add_subcategory(&mut self, subcategory: SubCategory) -> Uuid {
        let id = subcategory.id;
        self.subcategories.push(subcategory);
        self.touch();
        id
    }

    pub fn add_concept(&mut self, concept: Concept) -> Uuid {
        let id = concept.id;
        self.concepts.push(concept);
        self.touch();
        id
    }

    pub fn add_transaction(&mut self, transaction: Transaction) -> Uuid {
        let id = transaction.id;
        self.transactions.push(transaction);
        self.touch();
        id
    }

    pub fn add_payment(&mut self, payment: Payment) -> Uuid {
        let id = payment.id;
        self.payments.push(payment);
        self.touch();
        id
    }

    pub fn cost_type(&self, id: Uuid) -> Option<&CostType> {
        find_by_id(&self.cost_types, id)
    }

    pub fn category(&self, id: Uuid) -> Option<&Category> {
        find_by_id(&self.categories, id)
    }

    pub fn subcategory(&self, id: Uuid) -> Option<&SubCategory> {
        find_by_id(&self.subcategories, id)
    }

    pub fn concept(&self, id: Uuid) -> Option<&Concept> {
        find_by_id(&self.concepts, id)
    }

    pub fn transaction(&self, id: Uuid) -> Option<&Transaction> {
        find_by_id(&self.transactions, id)
    }

    pub fn transaction_mut(&mut self, id: Uuid) -> Option<&mut Transaction> {
        self.transactions.iter_mut().find(|txn| txn.id == id)
    }

    pub fn payment(&self, id: Uuid) -> Option<&Payment> {
        find_by_id(&self.payments, id)
    }

    pub fn remove_cost_type(&mut self, id: Uuid) -> Option<CostType> {
        remove_by_id(&mut self.cost_types, id).map(|item| {
            self.touch();
            item
        })
    }

    pub fn remove_category(&mut self, id: Uuid) -> Option<Category> {
        remove_by_id(&mut self.categories, id).map(|item| {
            self.touch();
            item
        })
    }

    pub fn remove_subcategory(&mut self, id: Uuid) -> Option<SubCategory> {
        remove_by_id(&mut self.subcategories, id).map(|item| {
            self.touch();
            item
        })
    }

    pub fn remove_concept(&mut self, id: Uuid) -> Option<Concept> {
        remove_by_id(&mut self.concepts, id).map(|item| {
            self.touch();
            item
        })
    }

    pub fn remove_transaction(&mut self, id: Uuid) -> Option<Transaction> {
        remove_by_id(&mut self.transactions, id).map(|item| {
            self.touch();
            item
        })
    }

    pub fn remove_payment(&mut self, id: Uuid) -> Option<Payment> {
        remove_by_id(&mut self.payments, id).map(|item| {
            self.touch();
            item
        })
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}

fn find_by_id<T: Identifiable>(items: &[T], id: Uuid) -> Option<&T> {
    items.iter().find(|item| item.id() == id)
}

fn remove_by_id<T: Identifiable>(items: &mut Vec<T>, id: Uuid) -> Option<T> {
    let index = items.iter().position(|item| item.id() == id)?;
    Some(items.remove(index))
}

//! Master-data records that classify transactions.
//!
//! The chain runs cost type -> category -> subcategory -> concept; each link
//! also carries the movement kind it applies to so pickers can be filtered
//! per direction.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::common::{Identifiable, NamedEntity};
use super::movement::MovementKind;

/// Groups spend or income by cost behavior (fixed, variable, ...).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CostType {
    pub id: Uuid,
    pub name: String,
    pub kind: MovementKind,
}

impl CostType {
    pub fn new(name: impl Into<String>, kind: MovementKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
        }
    }
}

/// Top-level classification under a cost type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub kind: MovementKind,
    pub cost_type: Uuid,
}

impl Category {
    pub fn new(name: impl Into<String>, kind: MovementKind, cost_type: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
            cost_type,
        }
    }
}

/// Optional refinement of a category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubCategory {
    pub id: Uuid,
    pub name: String,
    pub kind: MovementKind,
    pub cost_type: Uuid,
    pub category: Uuid,
}

impl SubCategory {
    pub fn new(
        name: impl Into<String>,
        kind: MovementKind,
        cost_type: Uuid,
        category: Uuid,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
            cost_type,
            category,
        }
    }
}

/// Leaf classification transactions and payments reference. Payments pool by
/// concept, so this is also the reconciliation key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Concept {
    pub id: Uuid,
    pub name: String,
    pub kind: MovementKind,
    pub cost_type: Uuid,
    pub category: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<Uuid>,
}

impl Concept {
    pub fn new(
        name: impl Into<String>,
        kind: MovementKind,
        cost_type: Uuid,
        category: Uuid,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
            cost_type,
            category,
            subcategory: None,
        }
    }

    pub fn with_subcategory(mut self, subcategory: Uuid) -> Self {
        self.subcategory = Some(subcategory);
        self
    }
}

impl Identifiable for CostType {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for CostType {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Identifiable for Category {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Category {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Identifiable for SubCategory {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for SubCategory {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Identifiable for Concept {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Concept {
    fn name(&self) -> &str {
        &self.name
    }
}

//! Classification enums shared by transactions and derived fields.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Direction of a transaction's cash movement.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MovementKind {
    Income,
    Expense,
}

impl fmt::Display for MovementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MovementKind::Income => "Income",
            MovementKind::Expense => "Expense",
        };
        f.write_str(label)
    }
}

/// Urgency label derived from the remaining installment windows.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        };
        f.write_str(label)
    }
}

/// Whether the pooled payments for a transaction's concept cover its amount.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Settlement {
    Paid,
    #[default]
    Pending,
}

impl fmt::Display for Settlement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Settlement::Paid => "Paid",
            Settlement::Pending => "Pending",
        };
        f.write_str(label)
    }
}

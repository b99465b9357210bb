use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::common::Identifiable;
use super::movement::{MovementKind, Priority, Settlement};
use super::period::Period;

/// A single income or expense entry.
///
/// The cycle inputs (`cutoff_day`/`due_day`) are user-authored for expenses
/// only; everything from `cutoff_date` down is derived by the recalculation
/// pass and is stale the moment any collection mutates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    pub date: NaiveDate,
    pub kind: MovementKind,
    pub cost_type: Uuid,
    pub concept: Uuid,
    pub amount: f64,
    pub period: Period,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cutoff_day: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_day: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cutoff_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installments: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub status: Settlement,
}

impl Transaction {
    /// Creates an income entry; cycle fields stay empty for this kind.
    pub fn income(
        date: NaiveDate,
        cost_type: Uuid,
        concept: Uuid,
        amount: f64,
        period: Period,
        income_date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            kind: MovementKind::Income,
            cost_type,
            concept,
            amount,
            period,
            notes: None,
            income_date: Some(income_date),
            cutoff_day: None,
            due_day: None,
            cutoff_date: None,
            due_date: None,
            installments: None,
            priority: None,
            status: Settlement::Pending,
        }
    }

    /// Creates an expense entry with its billing-cycle anchor days.
    #[allow(clippy::too_many_arguments)]
    pub fn expense(
        date: NaiveDate,
        cost_type: Uuid,
        concept: Uuid,
        amount: f64,
        period: Period,
        cutoff_day: u32,
        due_day: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            kind: MovementKind::Expense,
            cost_type,
            concept,
            amount,
            period,
            notes: None,
            income_date: None,
            cutoff_day: Some(cutoff_day),
            due_day: Some(due_day),
            cutoff_date: None,
            due_date: None,
            installments: None,
            priority: None,
            status: Settlement::Pending,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn is_expense(&self) -> bool {
        matches!(self.kind, MovementKind::Expense)
    }

    /// Blanks every field owned by the recalculation pass except status.
    pub fn clear_derived(&mut self) {
        self.cutoff_date = None;
        self.due_date = None;
        self.installments = None;
        self.priority = None;
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> Uuid {
        self.id
    }
}

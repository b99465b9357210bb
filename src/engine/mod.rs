//! Deterministic recalculation engine: cycle dates, installment windows,
//! priority, and settlement status, re-derived in full after every mutation.

pub mod cycle;
pub mod installments;
pub mod priority;
pub mod recalc;
pub mod reconcile;

pub use cycle::{add_months_rolling, cycle_dates, CycleDates};
pub use recalc::{recalculate, RecalcIssue, RecalcReport};
pub use reconcile::PaymentIndex;

//! Entity types shared across the dataset, engine, and services.

pub mod common;
pub mod master;
pub mod movement;
pub mod payment;
pub mod period;
pub mod transaction;

pub use common::{Identifiable, NamedEntity};
pub use master::{Category, Concept, CostType, SubCategory};
pub use movement::{MovementKind, Priority, Settlement};
pub use payment::Payment;
pub use period::Period;
pub use transaction::Transaction;

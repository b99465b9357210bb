#![doc(test(attr(deny(warnings))))]

//! Cashflow Core tracks personal income and expense transactions, deriving
//! billing-cycle dates, installment windows, priorities, and settlement
//! status through a deterministic recalculation engine.

pub mod core;
pub mod currency;
pub mod dataset;
pub mod domain;
pub mod engine;
pub mod errors;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Cashflow Core tracing initialized.");
    });
}

#![doc(test(attr(deny(warnings))))]

//! Kiwi Budget offers the core of a personal finance tracker: recurrence
//! expansion of transaction intents, lineage-based grouping and deletion,
//! and monthly aggregation with per-category spending goals.

pub mod cli;
pub mod currency;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Kiwi Budget tracing initialized.");
    });
}

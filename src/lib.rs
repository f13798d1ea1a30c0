#![doc(test(attr(deny(warnings))))]

//! Cash Flow Core projects a household's future balance from pending entries and
//! recurring transaction patterns, scoring each projected day with a decaying
//! confidence and flagging low-balance and overdraft risk.

pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod projection;
pub mod storage;
pub mod utils;

pub use crate::core::{ProjectionReport, ProjectionService};
pub use errors::{ProjectionError, Result};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Cash Flow Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}

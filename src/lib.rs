#![doc(test(attr(deny(warnings))))]

//! Vitality Core drives stepwise health-profile and biological-age forms,
//! persists profiles as JSON, and tracks daily nutrition against goals.

pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod recommendation;
pub mod storage;
pub mod utils;
pub mod wizard;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!(version = env!("CARGO_PKG_VERSION"), "vitality core initialized");
    });
}

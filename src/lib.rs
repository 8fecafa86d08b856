//! Shared-obligation ledger.
//!
//! Splits bills, subscriptions, expenses and savings goals between a small
//! group of people and tracks who has settled their share. Debt entries
//! (bills, subscriptions, expenses) move each participant's share from
//! pending to paid; goals accumulate contributions towards a per-person
//! target.
//!
//! [`worker::engine::Engine`] is the entry point for adapters: it owns the
//! store and serializes every mutation behind one lock.

pub mod app;
pub mod settings;

pub mod common {
    pub mod error;
    pub mod event;
    pub mod money;
}

pub mod domain {
    pub mod entry;
    pub mod ledger;
    pub mod participants;
    pub mod split;
}

pub mod io {
    pub mod reader;
    pub mod writer;
}

pub mod worker {
    pub mod engine;
    pub mod processor;

    pub mod handlers {
        pub mod contribute;
        pub mod create;
        pub mod mark_paid;
    }
}

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Installs the global `tracing` subscriber, logging to stderr.
///
/// `level` applies to this crate's targets; `RUST_LOG` can add more directives.
pub fn init_tracing(level: &str) {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("split_ledger={level}")));

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    });
}

// ABOUTME: Logging initialization for structured engine observability
// ABOUTME: Configures tracing-subscriber with env-filter based level control
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Structured logging setup built on `tracing`.
//!
//! Library consumers that already install a subscriber can skip this; it is
//! a convenience for binaries and examples embedding the engine.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter when `RUST_LOG` is unset
const DEFAULT_FILTER: &str = "wellness_engine=info";

/// Initialize the global tracing subscriber
///
/// Respects `RUST_LOG` when present. Safe to call once per process; a second
/// call is a no-op rather than a panic.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init();
}

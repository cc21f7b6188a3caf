//! Structured logging.
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - `RUST_LOG` wins over the configured level
//! - Logs go to stderr so command output on stdout stays machine readable

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when neither `RUST_LOG` nor a level is given.
pub const DEFAULT_FILTER: &str = "legacy_client_config=info";

/// Build the filter directive for `level` (e.g. "debug").
pub fn filter_for(level: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| match level {
        Some(level) => format!("legacy_client_config={},legacy_config={}", level, level).into(),
        None => DEFAULT_FILTER.into(),
    })
}

/// Install the global subscriber. Safe to call more than once; later calls are ignored.
pub fn init(level: Option<&str>) {
    let _ = tracing_subscriber::registry()
        .with(filter_for(level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! library code emits tracing events:
//!     → translator (legacy configuration in use, selector failures)
//!     → loader (document loaded)
//!
//! binaries install a subscriber:
//!     → logging.rs (EnvFilter + fmt layer to stderr)
//! ```
//!
//! # Design Decisions
//! - The library never installs a subscriber; only binaries do
//! - Structured fields over formatted messages

pub mod logging;

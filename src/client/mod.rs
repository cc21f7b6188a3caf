//! Client configuration subsystem.
//!
//! # Data Flow
//! ```text
//! translator (legacy or native configuration)
//!     → ClientConfigBuilder (append endpoints, set selectors/timeout)
//!     → ClientContextBuilder::build()
//!     → ClientContext (immutable, shared via Arc by the RPC layer)
//! ```
//!
//! # Design Decisions
//! - The builder is a trait so translators never depend on the concrete context
//! - Scalars are last-write-wins; endpoints are append-only
//! - Built contexts are immutable; reconfiguration means building a new one

pub mod builder;
pub mod connection;

pub use builder::{ClientConfigBuilder, ClientContext, ClientContextBuilder, ContextSummary};
pub use connection::{ClientConnection, ClientConnectionBuilder};

//! Legacy configuration bridge.
//!
//! # Data Flow
//! ```text
//! legacy properties (parsed upstream, or a snapshot document)
//!     → model.rs (LegacySnapshot: connections, clusters, selectors, timeout)
//!     → translator.rs
//!         → uri.rs (host/port/options → destination URI)
//!         → selector factories (deferred construction)
//!     → ClientConfigBuilder (endpoints, selectors, timeout)
//!
//! keys.rs answers "does this key set still use legacy names?"
//! ```
//!
//! # Design Decisions
//! - Absent snapshot means no legacy configuration; translation is a no-op
//! - Unset values are `Option`s, never sentinel numbers
//! - The key marker set is a value passed in, not global state

pub mod keys;
pub mod model;
pub mod translator;
pub mod uri;

pub use keys::{contains_legacy_markers, LegacyKeySet};
pub use model::{ClusterEntry, ConnectionEntry, ConnectionOptions, LegacySnapshot, LegacySnapshotBuilder};
pub use translator::{translate, ConfigError};

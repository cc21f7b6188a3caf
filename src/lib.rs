//! Legacy client configuration bridge.
//!
//! Translates legacy-style connection, cluster and global settings into a
//! typed client configuration for building an RPC client context.

pub mod client;
pub mod config;
pub mod legacy;
pub mod observability;
pub mod selector;

pub use client::{ClientConfigBuilder, ClientContext, ClientContextBuilder};
pub use config::SnapshotDocument;
pub use legacy::{contains_legacy_markers, translate, ConfigError, LegacyKeySet, LegacySnapshot};
pub use selector::SelectorRegistry;

//! Snapshot document handling.
//!
//! # Data Flow
//! ```text
//! snapshot document (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → SnapshotDocument::resolve(&SelectorRegistry)
//!     → LegacySnapshot (ready for the translator)
//! ```
//!
//! # Design Decisions
//! - The document is structured TOML; the flat legacy properties format is parsed elsewhere
//! - All fields have defaults to allow minimal documents
//! - Validation separates syntactic (serde) from semantic checks
//! - Selector classes stay names until translation invokes their factories

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_document, parse_document, LoadError};
pub use schema::{ClusterConfig, ConnectionConfig, SnapshotDocument};
pub use validation::{audit_connections, validate_document, SkipReason, SkippedConnection, ValidationError};

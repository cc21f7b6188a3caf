//! Snapshot document validation and connection auditing.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Detect duplicate cluster names and blank selector classes
//! - Validate value ranges (timeouts)
//! - Report which connection entries translation would drop, and why
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: SnapshotDocument → Result<(), Vec<ValidationError>>
//! - Bad connection entries are not validation errors; translation skips them,
//!   the audit only explains the skip

use std::collections::HashSet;

use serde::Serialize;
use thiserror::Error;

use crate::config::schema::{SnapshotDocument, UNSET_TIMEOUT_MS};
use crate::legacy::uri::destination_uri;
use crate::legacy::LegacySnapshot;

/// A semantic problem in a snapshot document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("cluster #{0} has an empty name")]
    EmptyClusterName(usize),

    #[error("cluster `{0}` is defined more than once")]
    DuplicateCluster(String),

    #[error("{0} names an empty selector class")]
    EmptySelectorClass(String),

    #[error("invocation timeout {0}ms is negative")]
    NegativeTimeout(i64),
}

/// Check a document before it is resolved.
pub fn validate_document(doc: &SnapshotDocument) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for (index, cluster) in doc.clusters.iter().enumerate() {
        if cluster.name.trim().is_empty() {
            errors.push(ValidationError::EmptyClusterName(index));
        } else if !seen.insert(cluster.name.as_str()) {
            errors.push(ValidationError::DuplicateCluster(cluster.name.clone()));
        }

        if cluster.node_selector.as_deref().is_some_and(|c| c.trim().is_empty()) {
            errors.push(ValidationError::EmptySelectorClass(format!("cluster `{}`", cluster.name)));
        }
    }

    if doc.deployment_node_selector.as_deref().is_some_and(|c| c.trim().is_empty()) {
        errors.push(ValidationError::EmptySelectorClass("deployment_node_selector".to_string()));
    }

    if let Some(ms) = doc.invocation_timeout_ms {
        if ms < 0 && ms != UNSET_TIMEOUT_MS {
            errors.push(ValidationError::NegativeTimeout(ms));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Why a connection entry contributes no endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    MissingHost,
    InvalidPort,
    InvalidUri,
}

/// A connection entry that translation will drop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedConnection {
    /// Position in the snapshot's connection list.
    pub index: usize,
    pub host: Option<String>,
    pub port: Option<i64>,
    pub reason: SkipReason,
}

/// List the connection entries the translator would skip, in order.
pub fn audit_connections(snapshot: &LegacySnapshot) -> Vec<SkippedConnection> {
    snapshot
        .connections()
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            let reason = if entry.host.is_none() {
                SkipReason::MissingHost
            } else if entry.valid_port().is_none() {
                SkipReason::InvalidPort
            } else if destination_uri(entry).is_none() {
                SkipReason::InvalidUri
            } else {
                return None;
            };
            Some(SkippedConnection {
                index,
                host: entry.host.clone(),
                port: entry.port,
                reason,
            })
        })
        .collect()
}

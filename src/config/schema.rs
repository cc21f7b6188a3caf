//! Snapshot document schema.
//!
//! All types derive Serde traits for deserialization from TOML documents.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::legacy::{ClusterEntry, ConnectionEntry, ConnectionOptions, LegacySnapshot};
use crate::selector::SelectorRegistry;

/// Value of `invocation_timeout_ms` meaning "not configured".
pub const UNSET_TIMEOUT_MS: i64 = -1;

/// Root of a snapshot document.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct SnapshotDocument {
    /// Remote connections, in priority order.
    pub connections: Vec<ConnectionConfig>,

    /// Per-cluster overrides.
    pub clusters: Vec<ClusterConfig>,

    /// Class identifier of the deployment node selector.
    pub deployment_node_selector: Option<String>,

    /// Global invocation timeout in milliseconds (-1 = unset).
    pub invocation_timeout_ms: Option<i64>,
}

/// One remote connection.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ConnectionConfig {
    /// Connection identifier for diagnostics.
    pub name: Option<String>,

    pub host: Option<String>,

    pub port: Option<i64>,

    /// Protocol options (e.g. `protocol`, `ssl_enabled`).
    pub options: BTreeMap<String, toml::Value>,
}

impl ConnectionConfig {
    fn to_entry(&self) -> ConnectionEntry {
        ConnectionEntry {
            host: self.host.clone(),
            port: self.port,
            options: self
                .options
                .iter()
                .map(|(k, v)| (k.clone(), option_string(v)))
                .collect::<ConnectionOptions>(),
        }
    }
}

fn option_string(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Cluster override.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ClusterConfig {
    pub name: String,

    /// Class identifier of the cluster node selector.
    pub node_selector: Option<String>,
}

impl SnapshotDocument {
    /// The configured timeout, if any. Negative values count as unset.
    pub fn invocation_timeout(&self) -> Option<Duration> {
        self.invocation_timeout_ms
            .and_then(|ms| u64::try_from(ms).ok())
            .map(Duration::from_millis)
    }

    /// Remove selector classes that `registry` cannot build for their slot,
    /// returning the removed names in document order (deployment first).
    pub fn retain_known_selectors(&mut self, registry: &SelectorRegistry) -> Vec<String> {
        let mut unresolved = Vec::new();

        if self
            .deployment_node_selector
            .as_deref()
            .is_some_and(|c| !registry.contains_deployment(c))
        {
            unresolved.extend(self.deployment_node_selector.take());
        }

        for cluster in &mut self.clusters {
            if cluster.node_selector.as_deref().is_some_and(|c| !registry.contains_cluster(c)) {
                unresolved.extend(cluster.node_selector.take());
            }
        }

        unresolved
    }

    /// Resolve selector class names against `registry` and build a snapshot.
    ///
    /// Unknown classes still produce factories; they fail when the
    /// translator invokes them.
    pub fn resolve(&self, registry: &SelectorRegistry) -> LegacySnapshot {
        let mut builder = LegacySnapshot::builder();

        for connection in &self.connections {
            builder = builder.connection(connection.to_entry());
        }

        for cluster in &self.clusters {
            let mut entry = ClusterEntry::new(cluster.name.clone());
            if let Some(class_name) = &cluster.node_selector {
                entry = entry.with_node_selector(registry.cluster_factory(class_name));
            }
            builder = builder.cluster(entry);
        }

        if let Some(class_name) = &self.deployment_node_selector {
            builder = builder.deployment_node_selector(registry.deployment_factory(class_name));
        }

        if let Some(timeout) = self.invocation_timeout() {
            builder = builder.invocation_timeout(timeout);
        }

        builder.build()
    }
}

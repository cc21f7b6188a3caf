//! Parsed legacy configuration model.
//!
//! A [`LegacySnapshot`] is produced once per translation, either built in code
//! or resolved from a [`SnapshotDocument`](crate::config::SnapshotDocument).

use std::collections::BTreeMap;
use std::time::Duration;

use crate::selector::{ClusterSelectorFactory, DeploymentSelectorFactory};

/// Protocol-level options attached to a connection entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionOptions {
    values: BTreeMap<String, String>,
}

impl ConnectionOptions {
    /// Option naming the URI scheme to connect with.
    pub const PROTOCOL: &'static str = "protocol";
    /// Option selecting the TLS variant of the default scheme.
    pub const SSL_ENABLED: &'static str = "ssl_enabled";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Boolean option; anything other than a case-insensitive `true` is false.
    pub fn get_bool(&self, key: &str) -> bool {
        self.get(key).is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ConnectionOptions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// One configured remote endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionEntry {
    pub host: Option<String>,
    /// Raw configured port. Only `1..=65535` is usable.
    pub port: Option<i64>,
    pub options: ConnectionOptions,
}

impl ConnectionEntry {
    pub fn new(host: impl Into<String>, port: i64) -> Self {
        Self {
            host: Some(host.into()),
            port: Some(port),
            options: ConnectionOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ConnectionOptions) -> Self {
        self.options = options;
        self
    }

    /// The port, if it is set and inside the TCP range.
    pub fn valid_port(&self) -> Option<u16> {
        self.port
            .and_then(|p| u16::try_from(p).ok())
            .filter(|p| *p != 0)
    }
}

/// Named cluster override.
#[derive(Debug)]
pub struct ClusterEntry {
    pub name: String,
    pub node_selector: Option<ClusterSelectorFactory>,
}

impl ClusterEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            node_selector: None,
        }
    }

    pub fn with_node_selector(mut self, factory: ClusterSelectorFactory) -> Self {
        self.node_selector = Some(factory);
        self
    }
}

/// The parsed legacy configuration consumed by the translator.
#[derive(Debug, Default)]
pub struct LegacySnapshot {
    connections: Vec<ConnectionEntry>,
    clusters: Vec<ClusterEntry>,
    deployment_node_selector: Option<DeploymentSelectorFactory>,
    invocation_timeout: Option<Duration>,
}

impl LegacySnapshot {
    pub fn builder() -> LegacySnapshotBuilder {
        LegacySnapshotBuilder::default()
    }

    pub fn connections(&self) -> &[ConnectionEntry] {
        &self.connections
    }

    /// Cluster entries in insertion order. Names are unique.
    pub fn clusters(&self) -> &[ClusterEntry] {
        &self.clusters
    }

    pub fn cluster(&self, name: &str) -> Option<&ClusterEntry> {
        self.clusters.iter().find(|c| c.name == name)
    }

    pub fn deployment_node_selector(&self) -> Option<&DeploymentSelectorFactory> {
        self.deployment_node_selector.as_ref()
    }

    pub fn invocation_timeout(&self) -> Option<Duration> {
        self.invocation_timeout
    }
}

/// Builder for [`LegacySnapshot`].
#[derive(Debug, Default)]
pub struct LegacySnapshotBuilder {
    snapshot: LegacySnapshot,
}

impl LegacySnapshotBuilder {
    pub fn connection(mut self, entry: ConnectionEntry) -> Self {
        self.snapshot.connections.push(entry);
        self
    }

    /// Add a cluster entry. An entry with the same name takes over the
    /// existing slot, keeping its position.
    pub fn cluster(mut self, entry: ClusterEntry) -> Self {
        match self.snapshot.clusters.iter_mut().find(|c| c.name == entry.name) {
            Some(slot) => *slot = entry,
            None => self.snapshot.clusters.push(entry),
        }
        self
    }

    pub fn deployment_node_selector(mut self, factory: DeploymentSelectorFactory) -> Self {
        self.snapshot.deployment_node_selector = Some(factory);
        self
    }

    pub fn invocation_timeout(mut self, timeout: Duration) -> Self {
        self.snapshot.invocation_timeout = Some(timeout);
        self
    }

    pub fn build(self) -> LegacySnapshot {
        self.snapshot
    }
}

//! Client context builder.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use crate::client::connection::ClientConnection;
use crate::selector::{ClusterNodeSelector, DeploymentNodeSelector};

/// Output contract for configuration translators.
pub trait ClientConfigBuilder {
    /// Append a destination endpoint.
    fn add_endpoint(&mut self, connection: ClientConnection);

    fn set_deployment_selector(&mut self, selector: Arc<dyn DeploymentNodeSelector>);

    fn set_cluster_selector(&mut self, selector: Arc<dyn ClusterNodeSelector>);

    fn set_invocation_timeout(&mut self, timeout: Duration);
}

/// Accumulates client configuration before building a [`ClientContext`].
#[derive(Debug, Clone, Default)]
pub struct ClientContextBuilder {
    connections: Vec<ClientConnection>,
    deployment_selector: Option<Arc<dyn DeploymentNodeSelector>>,
    cluster_selector: Option<Arc<dyn ClusterNodeSelector>>,
    invocation_timeout: Option<Duration>,
}

impl ClientContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connections(&self) -> &[ClientConnection] {
        &self.connections
    }

    pub fn deployment_selector(&self) -> Option<&Arc<dyn DeploymentNodeSelector>> {
        self.deployment_selector.as_ref()
    }

    pub fn cluster_selector(&self) -> Option<&Arc<dyn ClusterNodeSelector>> {
        self.cluster_selector.as_ref()
    }

    pub fn invocation_timeout(&self) -> Option<Duration> {
        self.invocation_timeout
    }

    pub fn build(self) -> ClientContext {
        ClientContext {
            connections: self.connections,
            deployment_selector: self.deployment_selector,
            cluster_selector: self.cluster_selector,
            invocation_timeout: self.invocation_timeout,
        }
    }
}

impl ClientConfigBuilder for ClientContextBuilder {
    fn add_endpoint(&mut self, connection: ClientConnection) {
        self.connections.push(connection);
    }

    fn set_deployment_selector(&mut self, selector: Arc<dyn DeploymentNodeSelector>) {
        self.deployment_selector = Some(selector);
    }

    fn set_cluster_selector(&mut self, selector: Arc<dyn ClusterNodeSelector>) {
        self.cluster_selector = Some(selector);
    }

    fn set_invocation_timeout(&mut self, timeout: Duration) {
        self.invocation_timeout = Some(timeout);
    }
}

/// Immutable client configuration handed to the RPC layer.
#[derive(Debug, Clone)]
pub struct ClientContext {
    connections: Vec<ClientConnection>,
    deployment_selector: Option<Arc<dyn DeploymentNodeSelector>>,
    cluster_selector: Option<Arc<dyn ClusterNodeSelector>>,
    invocation_timeout: Option<Duration>,
}

impl ClientContext {
    pub fn connections(&self) -> &[ClientConnection] {
        &self.connections
    }

    pub fn deployment_selector(&self) -> Option<&Arc<dyn DeploymentNodeSelector>> {
        self.deployment_selector.as_ref()
    }

    pub fn cluster_selector(&self) -> Option<&Arc<dyn ClusterNodeSelector>> {
        self.cluster_selector.as_ref()
    }

    pub fn invocation_timeout(&self) -> Option<Duration> {
        self.invocation_timeout
    }

    /// Serializable overview for operators.
    pub fn summary(&self) -> ContextSummary {
        ContextSummary {
            endpoints: self
                .connections
                .iter()
                .map(|c| c.destination().to_string())
                .collect(),
            deployment_selector: self.deployment_selector.as_ref().map(|s| format!("{:?}", s)),
            cluster_selector: self.cluster_selector.as_ref().map(|s| format!("{:?}", s)),
            invocation_timeout_ms: self
                .invocation_timeout
                .map(|t| u64::try_from(t.as_millis()).unwrap_or(u64::MAX)),
        }
    }
}

/// Printable view of a [`ClientContext`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContextSummary {
    pub endpoints: Vec<String>,
    pub deployment_selector: Option<String>,
    pub cluster_selector: Option<String>,
    pub invocation_timeout_ms: Option<u64>,
}

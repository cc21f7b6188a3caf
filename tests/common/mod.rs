//! Shared fixtures for integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use legacy_client_config::legacy::ConnectionEntry;
use legacy_client_config::selector::{
    ClusterNodeSelector, DeploymentNodeSelector, InstantiationError, SelectorFactory,
};

/// Deployment selector that always picks the first eligible node.
#[derive(Debug)]
pub struct FirstAvailable;

impl DeploymentNodeSelector for FirstAvailable {
    fn select_node(&self, eligible: &[String], _: &str, _: &str, _: &str) -> Option<String> {
        eligible.first().cloned()
    }
}

/// Cluster selector that answers with a fixed label, so tests can tell instances apart.
#[derive(Debug)]
pub struct Labelled(pub String);

impl ClusterNodeSelector for Labelled {
    fn select_node(&self, _: &str, _: &[String], _: &[String]) -> Option<String> {
        Some(self.0.clone())
    }
}

/// Cluster selector factory that counts invocations.
#[derive(Debug)]
pub struct CountingClusterFactory {
    pub class_name: String,
    pub calls: Arc<AtomicUsize>,
    pub fail: bool,
}

impl CountingClusterFactory {
    pub fn new(class_name: &str, fail: bool) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                class_name: class_name.to_string(),
                calls: calls.clone(),
                fail,
            },
            calls,
        )
    }
}

impl SelectorFactory<dyn ClusterNodeSelector> for CountingClusterFactory {
    fn class_name(&self) -> &str {
        &self.class_name
    }

    fn create(&self) -> Result<Arc<dyn ClusterNodeSelector>, InstantiationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(InstantiationError::Construction {
                class_name: self.class_name.clone(),
                reason: "constructor threw".into(),
            });
        }
        Ok(Arc::new(Labelled(self.class_name.clone())))
    }
}

/// Deployment selector factory whose failure can be toggled.
#[derive(Debug)]
pub struct ToggleDeploymentFactory {
    pub class_name: String,
    pub broken: bool,
}

impl SelectorFactory<dyn DeploymentNodeSelector> for ToggleDeploymentFactory {
    fn class_name(&self) -> &str {
        &self.class_name
    }

    fn create(&self) -> Result<Arc<dyn DeploymentNodeSelector>, InstantiationError> {
        if self.broken {
            Err(InstantiationError::NotInstantiable(self.class_name.clone()))
        } else {
            Ok(Arc::new(FirstAvailable))
        }
    }
}

/// Connection entry without a host.
#[allow(dead_code)]
pub fn hostless(port: i64) -> ConnectionEntry {
    ConnectionEntry {
        host: None,
        ..ConnectionEntry::new("unused", port)
    }
}

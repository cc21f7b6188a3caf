//! Class-name keyed selector registry.
//!
//! # Responsibilities
//! - Map configured class identifiers to selector constructors
//! - Hand out deferred factories for the translator to invoke
//!
//! # Design Decisions
//! - Lookup is captured when the factory is created but only reported on `create()`
//! - A class registered for the other selector kind is "not instantiable", not "not found"

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::selector::factory::{
    ClusterSelectorFactory, Constructor, DeploymentSelectorFactory, InstantiationError,
    SelectorFactory,
};
use crate::selector::{ClusterNodeSelector, DeploymentNodeSelector};

/// Registry of known selector classes.
#[derive(Clone, Default)]
pub struct SelectorRegistry {
    deployment: HashMap<String, Constructor<dyn DeploymentNodeSelector>>,
    cluster: HashMap<String, Constructor<dyn ClusterNodeSelector>>,
}

impl SelectorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a deployment-node selector constructor under `class_name`.
    /// A later registration with the same name replaces the earlier one.
    pub fn register_deployment<F>(&mut self, class_name: impl Into<String>, constructor: F) -> &mut Self
    where
        F: Fn() -> Result<Arc<dyn DeploymentNodeSelector>, InstantiationError> + Send + Sync + 'static,
    {
        self.deployment.insert(class_name.into(), Arc::new(constructor));
        self
    }

    /// Register a cluster-node selector constructor under `class_name`.
    pub fn register_cluster<F>(&mut self, class_name: impl Into<String>, constructor: F) -> &mut Self
    where
        F: Fn() -> Result<Arc<dyn ClusterNodeSelector>, InstantiationError> + Send + Sync + 'static,
    {
        self.cluster.insert(class_name.into(), Arc::new(constructor));
        self
    }

    pub fn contains(&self, class_name: &str) -> bool {
        self.contains_deployment(class_name) || self.contains_cluster(class_name)
    }

    pub fn contains_deployment(&self, class_name: &str) -> bool {
        self.deployment.contains_key(class_name)
    }

    pub fn contains_cluster(&self, class_name: &str) -> bool {
        self.cluster.contains_key(class_name)
    }

    /// Deferred factory for a deployment-node selector class.
    pub fn deployment_factory(&self, class_name: &str) -> DeploymentSelectorFactory {
        let resolution = match self.deployment.get(class_name) {
            Some(ctor) => Resolution::Found(ctor.clone()),
            None if self.cluster.contains_key(class_name) => Resolution::WrongKind,
            None => Resolution::Missing,
        };
        Box::new(RegisteredSelector {
            class_name: class_name.to_string(),
            resolution,
        })
    }

    /// Deferred factory for a cluster-node selector class.
    pub fn cluster_factory(&self, class_name: &str) -> ClusterSelectorFactory {
        let resolution = match self.cluster.get(class_name) {
            Some(ctor) => Resolution::Found(ctor.clone()),
            None if self.deployment.contains_key(class_name) => Resolution::WrongKind,
            None => Resolution::Missing,
        };
        Box::new(RegisteredSelector {
            class_name: class_name.to_string(),
            resolution,
        })
    }
}

impl fmt::Debug for SelectorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut deployment: Vec<_> = self.deployment.keys().collect();
        let mut cluster: Vec<_> = self.cluster.keys().collect();
        deployment.sort();
        cluster.sort();
        f.debug_struct("SelectorRegistry")
            .field("deployment", &deployment)
            .field("cluster", &cluster)
            .finish()
    }
}

enum Resolution<T: ?Sized> {
    Found(Constructor<T>),
    WrongKind,
    Missing,
}

/// Factory handed out by [`SelectorRegistry`].
pub struct RegisteredSelector<T: ?Sized> {
    class_name: String,
    resolution: Resolution<T>,
}

impl<T: ?Sized> fmt::Debug for RegisteredSelector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self.resolution {
            Resolution::Found(_) => "found",
            Resolution::WrongKind => "wrong-kind",
            Resolution::Missing => "missing",
        };
        f.debug_struct("RegisteredSelector")
            .field("class_name", &self.class_name)
            .field("resolution", &state)
            .finish()
    }
}

impl<T: ?Sized> SelectorFactory<T> for RegisteredSelector<T> {
    fn class_name(&self) -> &str {
        &self.class_name
    }

    fn create(&self) -> Result<Arc<T>, InstantiationError> {
        match &self.resolution {
            Resolution::Found(ctor) => ctor(),
            Resolution::WrongKind => Err(InstantiationError::NotInstantiable(self.class_name.clone())),
            Resolution::Missing => Err(InstantiationError::ClassNotFound(self.class_name.clone())),
        }
    }
}

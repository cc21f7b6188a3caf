//! Deferred selector construction.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::selector::{ClusterNodeSelector, DeploymentNodeSelector};

/// Errors raised while constructing a selector instance.
#[derive(Debug, Error)]
pub enum InstantiationError {
    /// No constructor is registered under the requested class name.
    #[error("selector class `{0}` not found")]
    ClassNotFound(String),

    /// The class is known but cannot be instantiated in this build.
    #[error("selector class `{0}` is not instantiable")]
    NotInstantiable(String),

    /// The constructor ran and failed.
    #[error("selector class `{class_name}` failed during construction: {reason}")]
    Construction { class_name: String, reason: String },
}

/// A constructor producing a fresh selector instance.
pub type Constructor<T> = Arc<dyn Fn() -> Result<Arc<T>, InstantiationError> + Send + Sync>;

/// Deferred-construction handle for a selector of type `T`.
pub trait SelectorFactory<T: ?Sized>: Send + Sync + fmt::Debug {
    /// The configured class identifier, used in diagnostics.
    fn class_name(&self) -> &str;

    /// Build a new selector instance.
    fn create(&self) -> Result<Arc<T>, InstantiationError>;
}

pub type DeploymentSelectorFactory = Box<dyn SelectorFactory<dyn DeploymentNodeSelector>>;
pub type ClusterSelectorFactory = Box<dyn SelectorFactory<dyn ClusterNodeSelector>>;

/// Factory backed by a plain closure.
pub struct FnSelectorFactory<T: ?Sized> {
    class_name: String,
    constructor: Constructor<T>,
}

impl<T: ?Sized> FnSelectorFactory<T> {
    pub fn new<F>(class_name: impl Into<String>, constructor: F) -> Self
    where
        F: Fn() -> Result<Arc<T>, InstantiationError> + Send + Sync + 'static,
    {
        Self {
            class_name: class_name.into(),
            constructor: Arc::new(constructor),
        }
    }
}

impl<T: ?Sized> fmt::Debug for FnSelectorFactory<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnSelectorFactory")
            .field("class_name", &self.class_name)
            .finish_non_exhaustive()
    }
}

impl<T: ?Sized> SelectorFactory<T> for FnSelectorFactory<T> {
    fn class_name(&self) -> &str {
        &self.class_name
    }

    fn create(&self) -> Result<Arc<T>, InstantiationError> {
        (self.constructor)()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct First;

    impl DeploymentNodeSelector for First {
        fn select_node(&self, eligible: &[String], _: &str, _: &str, _: &str) -> Option<String> {
            eligible.first().cloned()
        }
    }

    #[test]
    fn test_fn_factory_creates_fresh_instances() {
        let factory: FnSelectorFactory<dyn DeploymentNodeSelector> =
            FnSelectorFactory::new("test.First", || Ok(Arc::new(First) as Arc<dyn DeploymentNodeSelector>));

        assert_eq!(factory.class_name(), "test.First");
        let a = factory.create().unwrap();
        let b = factory.create().unwrap();
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(a.select_node(&["n1".into()], "app", "mod", ""), Some("n1".into()));
    }

    #[test]
    fn test_error_display() {
        let err = InstantiationError::ClassNotFound("x.Y".into());
        assert_eq!(err.to_string(), "selector class `x.Y` not found");

        let err = InstantiationError::Construction {
            class_name: "x.Y".into(),
            reason: "boom".into(),
        };
        assert!(err.to_string().contains("boom"));
    }
}

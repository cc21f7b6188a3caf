//! Pluggable node selection strategies.
//!
//! # Data Flow
//! ```text
//! snapshot names a selector class (e.g. "org.acme.StickySelector")
//!     → registry.rs (class name → constructor, resolved lazily)
//!     → factory.rs (SelectorFactory::create, called by the translator)
//!     → Arc<dyn DeploymentNodeSelector> / Arc<dyn ClusterNodeSelector>
//!     → handed to the client builder, which owns it from then on
//! ```
//!
//! # Design Decisions
//! - Selection algorithms live outside this crate; only instantiation is here
//! - Construction is deferred: an unknown class fails when invoked, not when named
//! - Selectors are shared trait objects so built contexts can cross threads

pub mod factory;
pub mod registry;

use std::fmt;

pub use factory::{
    ClusterSelectorFactory, Constructor, DeploymentSelectorFactory, FnSelectorFactory,
    InstantiationError, SelectorFactory,
};
pub use registry::{RegisteredSelector, SelectorRegistry};

/// Picks the node that should receive an invocation for a deployment.
pub trait DeploymentNodeSelector: Send + Sync + fmt::Debug {
    /// Choose one of `eligible_nodes` for the given deployment, or `None` to decline.
    fn select_node(
        &self,
        eligible_nodes: &[String],
        app_name: &str,
        module_name: &str,
        distinct_name: &str,
    ) -> Option<String>;
}

/// Picks the cluster member that should receive a cluster-routed invocation.
pub trait ClusterNodeSelector: Send + Sync + fmt::Debug {
    /// Choose a member of `cluster_name`. Already connected nodes are listed
    /// separately from the full membership.
    fn select_node(
        &self,
        cluster_name: &str,
        connected_nodes: &[String],
        total_available_nodes: &[String],
    ) -> Option<String>;
}

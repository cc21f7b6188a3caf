//! Legacy configuration translation.
//!
//! # Responsibilities
//! - Turn usable connection entries into client endpoints
//! - Instantiate the deployment-node and cluster-node selectors
//! - Carry over the global invocation timeout
//!
//! # Design Decisions
//! - Incomplete connection entries are dropped silently; they are user data issues
//! - A configured selector that cannot be built is fatal, the caller must not build a context
//! - Only the first cluster defining a selector is applied (single global cluster selector)
//! - On error the builder keeps whatever was applied before the failing step

use thiserror::Error;

use crate::client::{ClientConfigBuilder, ClientConnection};
use crate::legacy::model::LegacySnapshot;
use crate::legacy::uri::destination_uri;
use crate::selector::InstantiationError;

/// Fatal translation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot instantiate deployment node selector `{class_name}`")]
    DeploymentSelector {
        class_name: String,
        #[source]
        source: InstantiationError,
    },

    #[error("cannot instantiate cluster node selector `{class_name}` for cluster `{cluster}`")]
    ClusterSelector {
        cluster: String,
        class_name: String,
        #[source]
        source: InstantiationError,
    },
}

impl ConfigError {
    /// Class identifier of the selector that failed.
    pub fn class_name(&self) -> &str {
        match self {
            ConfigError::DeploymentSelector { class_name, .. }
            | ConfigError::ClusterSelector { class_name, .. } => class_name,
        }
    }
}

/// Apply a legacy snapshot to `builder`.
///
/// An absent snapshot is a no-op. Otherwise connections, the deployment
/// selector, the cluster selector and the invocation timeout are applied in
/// that order.
pub fn translate<B>(builder: &mut B, snapshot: Option<&LegacySnapshot>) -> Result<(), ConfigError>
where
    B: ClientConfigBuilder + ?Sized,
{
    let Some(snapshot) = snapshot else {
        return Ok(());
    };

    tracing::info!(
        connections = snapshot.connections().len(),
        clusters = snapshot.clusters().len(),
        "Legacy client configuration in use"
    );

    apply_connections(builder, snapshot);
    apply_deployment_selector(builder, snapshot)?;
    apply_cluster_selector(builder, snapshot)?;

    if let Some(timeout) = snapshot.invocation_timeout() {
        builder.set_invocation_timeout(timeout);
    }

    Ok(())
}

fn apply_connections<B>(builder: &mut B, snapshot: &LegacySnapshot)
where
    B: ClientConfigBuilder + ?Sized,
{
    for entry in snapshot.connections() {
        let connection = destination_uri(entry)
            .and_then(|uri| ClientConnection::builder().destination(uri).build());
        if let Some(connection) = connection {
            builder.add_endpoint(connection);
        }
    }
}

fn apply_deployment_selector<B>(builder: &mut B, snapshot: &LegacySnapshot) -> Result<(), ConfigError>
where
    B: ClientConfigBuilder + ?Sized,
{
    let Some(factory) = snapshot.deployment_node_selector() else {
        return Ok(());
    };

    let selector = factory.create().map_err(|source| {
        tracing::error!(class_name = factory.class_name(), error = %source, "Deployment node selector instantiation failed");
        ConfigError::DeploymentSelector {
            class_name: factory.class_name().to_string(),
            source,
        }
    })?;
    builder.set_deployment_selector(selector);
    Ok(())
}

fn apply_cluster_selector<B>(builder: &mut B, snapshot: &LegacySnapshot) -> Result<(), ConfigError>
where
    B: ClientConfigBuilder + ?Sized,
{
    let Some((cluster, factory)) = snapshot
        .clusters()
        .iter()
        .find_map(|c| c.node_selector.as_ref().map(|f| (c, f)))
    else {
        return Ok(());
    };

    let selector = factory.create().map_err(|source| {
        tracing::error!(
            cluster = %cluster.name,
            class_name = factory.class_name(),
            error = %source,
            "Cluster node selector instantiation failed"
        );
        ConfigError::ClusterSelector {
            cluster: cluster.name.clone(),
            class_name: factory.class_name().to_string(),
            source,
        }
    })?;
    builder.set_cluster_selector(selector);
    Ok(())
}

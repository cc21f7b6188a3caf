//! End-to-end translation tests.

use std::error::Error;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use legacy_client_config::client::ClientContextBuilder;
use legacy_client_config::config::{audit_connections, parse_document, SkipReason};
use legacy_client_config::legacy::{
    translate, ClusterEntry, ConfigError, ConnectionEntry, ConnectionOptions, LegacySnapshot,
};
use legacy_client_config::selector::{ClusterNodeSelector, DeploymentNodeSelector, InstantiationError, SelectorRegistry};
use legacy_client_config::ClientConfigBuilder;

mod common;

use common::{hostless, CountingClusterFactory, FirstAvailable, Labelled, ToggleDeploymentFactory};

#[test]
fn test_interleaved_entries_keep_relative_order() {
    let snapshot = LegacySnapshot::builder()
        .connection(hostless(1000))
        .connection(ConnectionEntry::new("one", 4001))
        .connection(ConnectionEntry::new("skip-port", 0))
        .connection(ConnectionEntry::new("two", 4002))
        .connection(ConnectionEntry::new("bad host", 4003))
        .connection(ConnectionEntry::new("skip-range", 70000))
        .connection(ConnectionEntry::new("three", 4004))
        .build();

    let mut builder = ClientContextBuilder::new();
    translate(&mut builder, Some(&snapshot)).unwrap();

    let hosts: Vec<_> = builder
        .connections()
        .iter()
        .map(|c| c.destination().host_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(hosts, ["one", "two", "three"]);

    let skipped: Vec<_> = audit_connections(&snapshot).iter().map(|s| s.index).collect();
    assert_eq!(skipped, [0, 2, 4, 5]);
}

#[test]
fn test_translation_appends_to_existing_endpoints() {
    let mut builder = ClientContextBuilder::new();
    let first = LegacySnapshot::builder().connection(ConnectionEntry::new("a", 1)).build();
    let second = LegacySnapshot::builder().connection(ConnectionEntry::new("b", 2)).build();

    translate(&mut builder, Some(&first)).unwrap();
    translate(&mut builder, Some(&second)).unwrap();

    assert_eq!(builder.connections().len(), 2);
    assert_eq!(builder.connections()[1].destination().host_str(), Some("b"));
}

#[test]
fn test_broken_deployment_selector_then_fixed() {
    let broken = LegacySnapshot::builder()
        .connection(ConnectionEntry::new("a", 9999))
        .deployment_node_selector(Box::new(ToggleDeploymentFactory {
            class_name: "org.acme.Sticky".into(),
            broken: true,
        }))
        .invocation_timeout(Duration::from_secs(5))
        .build();

    let err = translate(&mut ClientContextBuilder::new(), Some(&broken)).unwrap_err();
    assert!(matches!(err, ConfigError::DeploymentSelector { .. }));
    assert!(err.to_string().contains("org.acme.Sticky"));
    assert!(err.source().is_some());

    let fixed = LegacySnapshot::builder()
        .connection(ConnectionEntry::new("a", 9999))
        .deployment_node_selector(Box::new(ToggleDeploymentFactory {
            class_name: "org.acme.Sticky".into(),
            broken: false,
        }))
        .invocation_timeout(Duration::from_secs(5))
        .build();

    let mut builder = ClientContextBuilder::new();
    translate(&mut builder, Some(&fixed)).unwrap();
    assert_eq!(builder.connections().len(), 1);
    assert!(builder.deployment_selector().is_some());
    assert_eq!(builder.invocation_timeout(), Some(Duration::from_secs(5)));
}

#[test]
fn test_only_first_cluster_factory_is_invoked() {
    let (first, first_calls) = CountingClusterFactory::new("org.acme.First", false);
    let (second, second_calls) = CountingClusterFactory::new("org.acme.Second", false);

    let snapshot = LegacySnapshot::builder()
        .cluster(ClusterEntry::new("no-selector"))
        .cluster(ClusterEntry::new("alpha").with_node_selector(Box::new(first)))
        .cluster(ClusterEntry::new("beta").with_node_selector(Box::new(second)))
        .build();

    for _ in 0..2 {
        let mut builder = ClientContextBuilder::new();
        translate(&mut builder, Some(&snapshot)).unwrap();
        let selector = builder.cluster_selector().unwrap();
        assert_eq!(selector.select_node("alpha", &[], &[]), Some("org.acme.First".into()));
    }

    assert_eq!(first_calls.load(Ordering::SeqCst), 2);
    assert_eq!(second_calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_failing_cluster_factory_aborts() {
    let (failing, _) = CountingClusterFactory::new("org.acme.Broken", true);
    let snapshot = LegacySnapshot::builder()
        .cluster(ClusterEntry::new("ejb").with_node_selector(Box::new(failing)))
        .invocation_timeout(Duration::from_millis(250))
        .build();

    let mut builder = ClientContextBuilder::new();
    let err = translate(&mut builder, Some(&snapshot)).unwrap_err();

    assert_eq!(err.class_name(), "org.acme.Broken");
    let cause = err.source().and_then(|s| s.downcast_ref::<InstantiationError>());
    assert!(matches!(cause, Some(InstantiationError::Construction { .. })));
    assert!(builder.cluster_selector().is_none());
    assert_eq!(builder.invocation_timeout(), None);
}

#[test]
fn test_selectors_overwrite_prior_builder_values() {
    let mut builder = ClientContextBuilder::new();
    builder.set_cluster_selector(Arc::new(Labelled("preset".into())));
    builder.set_deployment_selector(Arc::new(FirstAvailable));
    builder.set_invocation_timeout(Duration::from_secs(60));

    let (factory, _) = CountingClusterFactory::new("org.acme.Override", false);
    let snapshot = LegacySnapshot::builder()
        .cluster(ClusterEntry::new("ejb").with_node_selector(Box::new(factory)))
        .invocation_timeout(Duration::from_secs(1))
        .build();

    translate(&mut builder, Some(&snapshot)).unwrap();

    let context = builder.build();
    assert_eq!(
        context.cluster_selector().unwrap().select_node("ejb", &[], &[]),
        Some("org.acme.Override".into())
    );
    assert!(context.deployment_selector().is_some());
    assert_eq!(context.invocation_timeout(), Some(Duration::from_secs(1)));
}

#[test]
fn test_document_through_registry() {
    let doc = parse_document(
        r#"
        deployment_node_selector = "org.acme.FirstAvailable"
        invocation_timeout_ms = -1

        [[connections]]
        host = "node1.example.com"
        port = 8080

        [[connections]]
        host = "node2.example.com"
        port = 8443
        options = { ssl_enabled = true }

        [[connections]]
        port = 8080

        [[clusters]]
        name = "ejb"
        node_selector = "org.acme.Labelled"
        "#,
    )
    .unwrap();

    let mut registry = SelectorRegistry::new();
    registry
        .register_deployment("org.acme.FirstAvailable", || {
            Ok(Arc::new(FirstAvailable) as Arc<dyn DeploymentNodeSelector>)
        })
        .register_cluster("org.acme.Labelled", || {
            Ok(Arc::new(Labelled("from-registry".into())) as Arc<dyn ClusterNodeSelector>)
        });

    let snapshot = doc.resolve(&registry);
    assert_eq!(audit_connections(&snapshot)[0].reason, SkipReason::MissingHost);

    let mut builder = ClientContextBuilder::new();
    translate(&mut builder, Some(&snapshot)).unwrap();
    let context = builder.build();

    let endpoints: Vec<_> = context.connections().iter().map(|c| c.destination().to_string()).collect();
    assert_eq!(
        endpoints,
        ["remote+http://node1.example.com:8080", "remote+https://node2.example.com:8443"]
    );
    assert_eq!(
        context.deployment_selector().unwrap().select_node(&["n1".into(), "n2".into()], "app", "mod", ""),
        Some("n1".into())
    );
    assert!(context.cluster_selector().is_some());
    assert_eq!(context.invocation_timeout(), None);
}

#[test]
fn test_unregistered_document_selector_is_fatal() {
    let doc = parse_document(
        r#"
        [[clusters]]
        name = "ejb"
        node_selector = "org.acme.NotThere"
        "#,
    )
    .unwrap();

    let snapshot = doc.resolve(&SelectorRegistry::new());
    let err = translate(&mut ClientContextBuilder::new(), Some(&snapshot)).unwrap_err();
    assert!(err.to_string().contains("org.acme.NotThere"));
    assert!(err.to_string().contains("ejb"));
}

#[test]
fn test_out_of_range_document_port_skips_only_that_entry() {
    let doc = parse_document(
        r#"
        [[connections]]
        host = "good.example.com"
        port = 8080

        [[connections]]
        host = "huge.example.com"
        port = 4294967296
        "#,
    )
    .unwrap();

    let snapshot = doc.resolve(&SelectorRegistry::new());
    let skipped = audit_connections(&snapshot);
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0].index, 1);
    assert_eq!(skipped[0].reason, SkipReason::InvalidPort);
    assert_eq!(skipped[0].port, Some(4_294_967_296));

    let mut builder = ClientContextBuilder::new();
    translate(&mut builder, Some(&snapshot)).unwrap();
    let endpoints: Vec<_> = builder.connections().iter().map(|c| c.destination().to_string()).collect();
    assert_eq!(endpoints, ["remote+http://good.example.com:8080"]);
}

#[test]
fn test_hosts_rewritten_by_the_parser_are_skipped() {
    let snapshot = LegacySnapshot::builder()
        .connection(ConnectionEntry::new("@host", 80))
        .connection(
            ConnectionEntry::new("1.2.3", 8080)
                .with_options(ConnectionOptions::new().with(ConnectionOptions::PROTOCOL, "http")),
        )
        .connection(ConnectionEntry::new("kept", 8080))
        .build();

    let mut builder = ClientContextBuilder::new();
    translate(&mut builder, Some(&snapshot)).unwrap();

    let endpoints: Vec<_> = builder.connections().iter().map(|c| c.destination().to_string()).collect();
    assert_eq!(endpoints, ["remote+http://kept:8080"]);

    let reasons: Vec<_> = audit_connections(&snapshot).iter().map(|s| s.reason).collect();
    assert_eq!(reasons, [SkipReason::InvalidUri, SkipReason::InvalidUri]);
}

//! Property tests for Kubernetes endpoint precedence and name handling

use kontext::context::{
    create_context, BackendOptions, CancelSignal, EndpointData, KubeContextParams, KubeEndpoint,
};
use kontext::registry::{ContextRegistry, FileContextRegistry, MemoryContextRegistry, ReservedNames};
use proptest::prelude::*;
use tempfile::TempDir;

fn kube_options(endpoint: Option<String>, from_environment: bool) -> BackendOptions {
    BackendOptions::Kubernetes(KubeContextParams {
        description: String::new(),
        endpoint,
        from_environment,
    })
}

/// A non-empty endpoint always wins over environment discovery.
#[test]
fn test_explicit_endpoint_precedence_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &("[a-z0-9:/.-]{1,40}", any::<bool>()),
            |(endpoint, from_environment)| {
                let resolved = kube_options(Some(endpoint.clone()), from_environment)
                    .resolve()
                    .unwrap();
                assert_eq!(
                    resolved.endpoint,
                    EndpointData::Kubernetes(KubeEndpoint {
                        endpoint,
                        from_environment: false,
                    })
                );
                Ok(())
            },
        )
        .unwrap();
}

/// Without an endpoint, the persisted flag is exactly what the caller asked for.
#[test]
fn test_environment_default_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(prop_oneof![Just(None), Just(Some(String::new()))], any::<bool>()),
            |(endpoint, from_environment)| {
                let resolved = kube_options(endpoint, from_environment).resolve().unwrap();
                assert_eq!(
                    resolved.endpoint,
                    EndpointData::Kubernetes(KubeEndpoint {
                        endpoint: String::new(),
                        from_environment,
                    })
                );
                Ok(())
            },
        )
        .unwrap();
}

/// Any valid name can be created once and only once, and reads back intact.
#[test]
fn test_arbitrary_names_are_unique_in_file_registry() {
    let mut runner = proptest::test_runner::TestRunner::new(proptest::test_runner::Config {
        cases: 64,
        ..Default::default()
    });
    let dir = TempDir::new().unwrap();
    let registry = FileContextRegistry::new(dir.path(), ReservedNames::none()).unwrap();

    runner
        .run(&"[^\\p{Cc}]{1,24}", |name| {
            prop_assume!(!name.trim().is_empty());
            prop_assume!(!registry.exists(&name).unwrap());

            let cancel = CancelSignal::new();
            let created =
                create_context(&registry, &name, kube_options(None, true), &cancel).unwrap();
            assert_eq!(registry.get(&name).unwrap(), Some(created));

            let second = create_context(&registry, &name, kube_options(None, true), &cancel);
            assert!(second.unwrap_err().is_already_exists());
            Ok(())
        })
        .unwrap();
}

/// Failed attempts never change what is stored.
#[test]
fn test_failed_creates_leave_memory_registry_unchanged() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &proptest::collection::vec(("[a-c]", any::<bool>()), 1..20),
            |attempts| {
                let registry = MemoryContextRegistry::new(ReservedNames::none());
                let cancel = CancelSignal::new();
                let mut expected: Vec<String> = Vec::new();

                for (name, from_environment) in attempts {
                    let before = registry.list().unwrap();
                    let result =
                        create_context(&registry, &name, kube_options(None, from_environment), &cancel);
                    if expected.contains(&name) {
                        assert!(result.unwrap_err().is_already_exists());
                        assert_eq!(registry.list().unwrap(), before);
                    } else {
                        result.unwrap();
                        expected.push(name);
                    }
                }

                expected.sort();
                let names: Vec<String> =
                    registry.list().unwrap().into_iter().map(|r| r.name).collect();
                assert_eq!(names, expected);
                Ok(())
            },
        )
        .unwrap();
}

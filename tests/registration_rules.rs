//! Integration tests for the registration protocol: duplicate rejection,
//! explicit reregistration, lookup failures, and call chaining.

use lifetime_registry::{ManagerApi, ProviderApi, Registry, RegistryError};
use std::sync::Arc;

#[test]
fn test_duplicate_registration_fails_without_permission() {
    let registry = Registry::new();
    registry
        .register_singleton::<String, _>(|_| "original".to_string(), false)
        .unwrap();

    // Same type, any lifetime: rejected
    let result = registry.register_instanced::<String, _>(|_| "usurper".to_string(), false);
    assert_eq!(
        result.err(),
        Some(RegistryError::AlreadyRegistered {
            type_name: "alloc::string::String"
        })
    );

    // Existing registration untouched
    assert_eq!(&*registry.get_dependency::<String>().unwrap(), "original");
}

#[test]
fn test_reregistration_with_permission_replaces_outright() {
    let registry = Registry::new();
    registry
        .register_singleton::<i32, _>(|_| 1, false)
        .unwrap();

    // Materialize the singleton so there is cached state to discard
    let old = registry.get_dependency::<i32>().unwrap();
    assert_eq!(*old, 1);

    registry
        .register_singleton::<i32, _>(|_| 2, true)
        .unwrap();

    let new = registry.get_dependency::<i32>().unwrap();
    assert_eq!(*new, 2);
    assert!(!Arc::ptr_eq(&old, &new));
}

#[test]
fn test_reregistration_may_change_lifetime() {
    let registry = Registry::new();
    registry
        .register_singleton::<String, _>(|_| "once".to_string(), false)
        .unwrap();

    registry
        .register_instanced::<String, _>(|_| "many".to_string(), true)
        .unwrap();

    let a = registry.get_dependency::<String>().unwrap();
    let b = registry.get_dependency::<String>().unwrap();
    assert_eq!(&*a, "many");
    assert!(!Arc::ptr_eq(&a, &b));
}

#[test]
fn test_get_dependency_unregistered_fails() {
    let registry = Registry::new();

    let result = registry.get_dependency::<u128>();
    assert_eq!(
        result.err(),
        Some(RegistryError::NotRegistered { type_name: "u128" })
    );
}

#[test]
fn test_try_get_dependency_unregistered_is_absent() {
    let registry = Registry::new();

    // Same lookup as get_dependency, but absence is not a failure
    assert_eq!(registry.try_get_dependency::<u128>().unwrap(), None);
}

#[test]
fn test_try_get_dependency_registered_resolves() {
    let registry = Registry::new();
    registry
        .register_singleton::<u128, _>(|_| 77u128, false)
        .unwrap();

    let value = registry.try_get_dependency::<u128>().unwrap();
    assert_eq!(value.as_deref(), Some(&77));
}

#[test]
fn test_registration_chaining_with_question_mark() -> Result<(), RegistryError> {
    struct A;
    struct B;
    struct C;

    let registry = Registry::new();
    registry
        .register_singleton::<A, _>(|_| A, false)?
        .register_instanced::<B, _>(|_| B, false)?
        .register_thread_local::<C, _>(|_| C, false)?;

    assert!(registry.contains::<A>());
    assert!(registry.contains::<B>());
    assert!(registry.contains::<C>());
    Ok(())
}

#[test]
fn test_chaining_stops_at_first_duplicate() {
    struct A;
    struct B;

    let registry = Registry::new();
    registry.register_singleton::<A, _>(|_| A, false).unwrap();

    let chained = registry
        .register_singleton::<A, _>(|_| A, false)
        .and_then(|r| r.register_singleton::<B, _>(|_| B, false));

    assert!(matches!(
        chained.err(),
        Some(RegistryError::AlreadyRegistered { .. })
    ));
    // B never got registered
    assert!(!registry.contains::<B>());
}

#[test]
fn test_distinct_types_do_not_collide() {
    #[derive(Debug, PartialEq)]
    struct Port(u16);
    #[derive(Debug, PartialEq)]
    struct Retries(u16);

    let registry = Registry::new();
    registry
        .register_singleton::<Port, _>(|_| Port(8080), false)
        .unwrap()
        .register_singleton::<Retries, _>(|_| Retries(3), false)
        .unwrap();

    assert_eq!(*registry.get_dependency::<Port>().unwrap(), Port(8080));
    assert_eq!(*registry.get_dependency::<Retries>().unwrap(), Retries(3));
}

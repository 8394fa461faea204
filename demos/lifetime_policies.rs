//! Lifetime policy example for lifetime-registry.
//!
//! Demonstrates:
//! - How the three policies cache (or don't cache) instances
//! - Thread-local instances across spawned threads
//! - Reregistration with `allow_reregister = true`
//! - Changing a lifetime in place with `update_lifetime()`
//!
//! Run with: `cargo run --example lifetime_policies`

use lifetime_registry::{Lifetime, ManagerApi, ProviderApi, Registry};
use std::sync::Arc;
use std::thread;

fn main() {
    println!("=== lifetime-registry: Lifetime Policies ===\n");

    let registry = Registry::new();

    // -------------------------------------------------------------------------
    // 1. Singleton: one shared instance
    // -------------------------------------------------------------------------
    println!("1. Singleton...");

    registry
        .register_singleton::<String, _>(|_| "built once".to_string(), false)
        .unwrap();

    let a: Arc<String> = registry.get_dependency().unwrap();
    let b: Arc<String> = registry.get_dependency().unwrap();
    println!("   value:         {}", a);
    println!("   identity-equal: {}", Arc::ptr_eq(&a, &b));

    // -------------------------------------------------------------------------
    // 2. Instanced: fresh instance per resolution
    // -------------------------------------------------------------------------
    println!("\n2. Instanced...");

    registry
        .register_instanced::<u32, _>(|_| 7u32, false)
        .unwrap();

    let x: Arc<u32> = registry.get_dependency().unwrap();
    let y: Arc<u32> = registry.get_dependency().unwrap();
    println!("   values:        {} / {}", x, y);
    println!("   identity-equal: {}", Arc::ptr_eq(&x, &y));

    // -------------------------------------------------------------------------
    // 3. ThreadLocal: one instance per calling thread
    // -------------------------------------------------------------------------
    println!("\n3. ThreadLocal...");

    registry
        .register_thread_local::<i64, _>(|_| 40i64, false)
        .unwrap();

    let main_instance: Arc<i64> = registry.get_dependency().unwrap();

    thread::scope(|scope| {
        scope.spawn(|| {
            let worker_instance: Arc<i64> = registry.get_dependency().unwrap();
            println!(
                "   worker sees its own instance: {}",
                !Arc::ptr_eq(&main_instance, &worker_instance)
            );
        });
    });

    let main_again: Arc<i64> = registry.get_dependency().unwrap();
    println!(
        "   main thread keeps its instance: {}",
        Arc::ptr_eq(&main_instance, &main_again)
    );

    // -------------------------------------------------------------------------
    // 4. Reregistration replaces cached state
    // -------------------------------------------------------------------------
    println!("\n4. Reregistration with allow_reregister = true...");

    registry
        .register_singleton::<String, _>(|_| "built again".to_string(), true)
        .unwrap();

    let replaced: Arc<String> = registry.get_dependency().unwrap();
    println!("   new value: {}", replaced);
    println!("   old instance discarded: {}", !Arc::ptr_eq(&a, &replaced));

    // -------------------------------------------------------------------------
    // 5. update_lifetime() switches the policy and discards the cache
    // -------------------------------------------------------------------------
    println!("\n5. update_lifetime(Singleton -> Instanced)...");

    registry
        .update_lifetime::<String>(Lifetime::Instanced)
        .unwrap();

    let p: Arc<String> = registry.get_dependency().unwrap();
    let q: Arc<String> = registry.get_dependency().unwrap();
    println!("   values still come from the factory: {}", p);
    println!("   now distinct per call: {}", !Arc::ptr_eq(&p, &q));

    println!("\n=== Example Complete ===");
}

//! Basic usage example for lifetime-registry.
//!
//! Demonstrates:
//! - Registering factories under the three lifetime policies
//! - Resolving instances with `get_dependency()` (returns `Arc<T>`)
//! - Optional lookup with `try_get_dependency()`
//! - Checking registration status with `contains()`
//!
//! Run with: `cargo run --example basic_usage`

use lifetime_registry::{ManagerApi, ProviderApi, Registry};
use std::sync::Arc;

// Custom struct to demonstrate complex types
#[derive(Debug, Clone, PartialEq)]
struct AppConfig {
    name: String,
    version: u32,
    debug_mode: bool,
}

fn main() {
    println!("=== lifetime-registry: Basic Usage ===\n");

    let registry = Registry::new();

    // -------------------------------------------------------------------------
    // 1. Register a singleton
    // -------------------------------------------------------------------------
    println!("1. Registering a singleton AppConfig...");

    registry
        .register_singleton::<AppConfig, _>(
            |_| AppConfig {
                name: "MyApp".to_string(),
                version: 1,
                debug_mode: true,
            },
            false,
        )
        .unwrap();

    println!("   Registered: AppConfig (singleton, not yet constructed)");

    // -------------------------------------------------------------------------
    // 2. Register an instanced factory
    // -------------------------------------------------------------------------
    println!("\n2. Registering an instanced String factory...");

    registry
        .register_instanced::<String, _>(|_| "a fresh string".to_string(), false)
        .unwrap();

    println!("   Registered: String (instanced)");

    // -------------------------------------------------------------------------
    // 3. Register a thread-local factory
    // -------------------------------------------------------------------------
    println!("\n3. Registering a thread-local counter seed...");

    registry
        .register_thread_local::<u64, _>(|_| 0u64, false)
        .unwrap();

    println!("   Registered: u64 (thread-local)");

    // -------------------------------------------------------------------------
    // 4. Check registration status with contains()
    // -------------------------------------------------------------------------
    println!("\n4. Checking registration status with contains()...");

    println!("   contains::<AppConfig>() = {}", registry.contains::<AppConfig>());
    println!("   contains::<String>()    = {}", registry.contains::<String>());
    println!("   contains::<Vec<u8>>()   = {}", registry.contains::<Vec<u8>>()); // Not registered

    // -------------------------------------------------------------------------
    // 5. Resolve instances with get_dependency() -> Arc<T>
    // -------------------------------------------------------------------------
    println!("\n5. Resolving with get_dependency() -> Arc<T>...");

    let config: Arc<AppConfig> = registry.get_dependency().unwrap();
    let config_again: Arc<AppConfig> = registry.get_dependency().unwrap();

    println!("   AppConfig:              {:?}", *config);
    println!(
        "   same instance twice:    {}",
        Arc::ptr_eq(&config, &config_again)
    );

    let s1: Arc<String> = registry.get_dependency().unwrap();
    let s2: Arc<String> = registry.get_dependency().unwrap();
    println!("   String (instanced):     {:?} == {:?}", s1, s2);
    println!(
        "   distinct instances:     {}",
        !Arc::ptr_eq(&s1, &s2)
    );

    // -------------------------------------------------------------------------
    // 6. Optional lookup with try_get_dependency()
    // -------------------------------------------------------------------------
    println!("\n6. Optional lookup with try_get_dependency()...");

    match registry.try_get_dependency::<Vec<u8>>().unwrap() {
        Some(value) => println!("   Found Vec<u8>: {:?}", value),
        None => println!("   Vec<u8> is absent (no error raised)"),
    }

    // -------------------------------------------------------------------------
    // 7. Handle missing types with get_dependency()
    // -------------------------------------------------------------------------
    println!("\n7. Handling missing types...");

    match registry.get_dependency::<Vec<u8>>() {
        Ok(value) => println!("   Found Vec<u8>: {:?}", value),
        Err(e) => println!("   Error (expected): {}", e),
    }

    // -------------------------------------------------------------------------
    // Summary
    // -------------------------------------------------------------------------
    println!("\n=== Example Complete ===");
    println!("The registry holds 3 registrations (AppConfig, String, u64).");
}

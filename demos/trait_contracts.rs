//! Trait-contract example for lifetime-registry.
//!
//! Demonstrates the classic DI setup: components depend on trait objects,
//! factories wire implementations together through the `Provider` view, and
//! consumers are restricted to the read-only facet.
//!
//! Run with: `cargo run --example trait_contracts`

use lifetime_registry::{ManagerApi, Provider, ProviderApi, Registry};
use std::sync::Arc;

// Service contracts
trait Clock: Send + Sync {
    fn now(&self) -> u64;
}

trait Greeter: Send + Sync {
    fn greet(&self, name: &str) -> String;
}

// Implementations
struct FixedClock(u64);

impl Clock for FixedClock {
    fn now(&self) -> u64 {
        self.0
    }
}

struct TimestampedGreeter {
    clock: Arc<dyn Clock>,
}

impl Greeter for TimestampedGreeter {
    fn greet(&self, name: &str) -> String {
        format!("[{}] Hello, {}!", self.clock.now(), name)
    }
}

// A consumer that only ever sees the provider facet: it can resolve its
// collaborators but cannot register or reconfigure anything.
fn run_component(provider: Provider<'_>) {
    let greeter = provider.get_dependency::<Arc<dyn Greeter>>().unwrap();
    println!("   component output: {}", greeter.greet("world"));
}

fn main() {
    println!("=== lifetime-registry: Trait Contracts ===\n");

    let registry = Registry::new();

    // -------------------------------------------------------------------------
    // 1. Register the clock contract
    // -------------------------------------------------------------------------
    println!("1. Registering Arc<dyn Clock> (singleton)...");

    registry
        .register_singleton::<Arc<dyn Clock>, _>(
            |_| Arc::new(FixedClock(1_700_000_000)) as Arc<dyn Clock>,
            false,
        )
        .unwrap();

    // -------------------------------------------------------------------------
    // 2. Register the greeter, resolving the clock recursively
    // -------------------------------------------------------------------------
    println!("2. Registering Arc<dyn Greeter> wired to the clock...");

    registry
        .register_singleton::<Arc<dyn Greeter>, _>(
            |provider| {
                let clock = provider.get_dependency::<Arc<dyn Clock>>().unwrap();
                Arc::new(TimestampedGreeter {
                    clock: Arc::clone(&clock),
                }) as Arc<dyn Greeter>
            },
            false,
        )
        .unwrap();

    // -------------------------------------------------------------------------
    // 3. Hand the provider facet to a component
    // -------------------------------------------------------------------------
    println!("3. Running a component against the provider facet...\n");

    run_component(registry.provider());

    println!("\n=== Example Complete ===");
}

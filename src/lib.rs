//! # Lifetime Registry
//!
//! A thread-safe dependency-injection registry with pluggable instance
//! lifetimes.
//!
//! Application code registers a factory under a type and a [`Lifetime`]
//! policy, then requests collaborators by that type without knowing how they
//! are constructed:
//!
//! - **Singleton** — one shared instance, created lazily on first access
//! - **Instanced** — a fresh instance on every resolution
//! - **ThreadLocal** — one lazily created instance per calling thread
//!
//! ## Quick Start
//!
//! ```rust
//! use lifetime_registry::{ManagerApi, ProviderApi, Registry};
//! use std::sync::Arc;
//!
//! let registry = Registry::new();
//!
//! // Register a singleton factory
//! registry
//!     .register_singleton::<String, _>(|_| "Hello, world!".to_string(), false)
//!     .unwrap();
//!
//! // Resolve it; repeated calls share the same instance
//! let first: Arc<String> = registry.get_dependency().unwrap();
//! let second: Arc<String> = registry.get_dependency().unwrap();
//!
//! assert_eq!(&*first, "Hello, world!");
//! assert!(Arc::ptr_eq(&first, &second));
//! ```
//!
//! ## Recursive resolution
//!
//! Factories receive a read-only [`Provider`] view of the registry, so a
//! dependency graph can be resolved during construction:
//!
//! ```rust
//! use lifetime_registry::{ManagerApi, ProviderApi, Registry};
//!
//! struct Config { url: String }
//! struct Client { url: String }
//!
//! let registry = Registry::new();
//! registry
//!     .register_singleton::<Config, _>(|_| Config { url: "https://api".into() }, false)
//!     .unwrap()
//!     .register_instanced::<Client, _>(
//!         |provider| Client {
//!             url: provider.get_dependency::<Config>().unwrap().url.clone(),
//!         },
//!         false,
//!     )
//!     .unwrap();
//!
//! assert_eq!(registry.get_dependency::<Client>().unwrap().url, "https://api");
//! ```
//!
//! ## Features
//!
//! - **Thread-safe**: any thread may register, resolve, or change lifetimes
//! - **Type-safe**: instances are stored type-erased and recovered with a
//!   checked downcast
//! - **Exactly-once construction**: singleton and thread-local factories run
//!   at most once per cache slot, even under concurrent first access
//! - **Facet views**: hand out [`Provider`] to code that must not register
//! - **Tracing support**: optional callback system for monitoring operations
//!
//! ## Main Types
//!
//! - [`Registry`] - the owned container object
//! - [`ManagerApi`] / [`ProviderApi`] - full and read-only capability facets
//! - [`Lifetime`] - the three instance-lifetime policies
//! - [`define_container!`] - opt-in module-level containers

mod macros;
mod registration;
mod registry;
mod registry_error;
mod registry_event;
mod registry_trait;

// Re-export the main public API
pub use registration::Lifetime;
pub use registry::{Registry, TraceCallback};
pub use registry_error::RegistryError;
pub use registry_event::RegistryEvent;
pub use registry_trait::{ManagerApi, Provider, ProviderApi};

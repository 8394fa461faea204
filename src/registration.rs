//! Per-entry lifetime logic: the [`Lifetime`] policy and the [`Registration`]
//! record that materializes instances according to it.
//!
//! Each registered type gets exactly one `Registration`. The record owns the
//! type-erased factory and all cached state, so the registry's map lock never
//! has to be held while a factory runs.

use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};
use std::thread::{self, ThreadId};

use crate::registry_error::RegistryError;
use crate::registry_trait::Provider;

/// A stored instance with its concrete type erased.
///
/// Instances are recovered with a checked downcast when a caller requests
/// them back under their concrete type.
pub(crate) type BoxedInstance = Arc<dyn Any + Send + Sync>;

/// Type-erased factory stored inside a [`Registration`].
///
/// The factory receives a read-only [`Provider`] view of the owning registry
/// so it can resolve its own dependencies recursively.
pub(crate) type ErasedFactory = Arc<dyn for<'r> Fn(Provider<'r>) -> BoxedInstance + Send + Sync>;

/// How many distinct instances a registration produces over its life.
///
/// - `Singleton`: one instance, created lazily on first request and shared
///   by every caller on every thread afterwards.
/// - `Instanced`: a fresh instance on every request; nothing is cached.
/// - `ThreadLocal`: one instance per calling thread, created lazily the
///   first time that thread asks for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifetime {
    /// Single shared instance, created once on first access.
    Singleton,
    /// New instance per resolution, never cached.
    Instanced,
    /// One lazily created instance per calling thread.
    ThreadLocal,
}

impl std::fmt::Display for Lifetime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Lifetime::Singleton => write!(f, "singleton"),
            Lifetime::Instanced => write!(f, "instanced"),
            Lifetime::ThreadLocal => write!(f, "thread-local"),
        }
    }
}

/// The record held for one registered type: its factory, lifetime policy,
/// and cached state.
///
/// The lifetime is fixed for the life of the record; the registry swaps in a
/// fresh record (sharing the factory) when a lifetime is changed, which is
/// what discards stale caches.
pub(crate) struct Registration {
    /// Diagnostic name of the registered type, captured at registration.
    type_name: &'static str,
    lifetime: Lifetime,
    factory: ErasedFactory,
    /// Filled at most once, even under concurrent first access.
    singleton: OnceLock<BoxedInstance>,
    /// One slot per calling thread. Only the owning thread ever writes its
    /// own slot, so the lock is only needed to guard the map structure.
    per_thread: Mutex<HashMap<ThreadId, BoxedInstance>>,
}

impl Registration {
    /// Creates a record for type `T` with the given lifetime and factory.
    pub(crate) fn new<T, F>(lifetime: Lifetime, factory: F) -> Self
    where
        T: Send + Sync + 'static,
        F: for<'r> Fn(Provider<'r>) -> T + Send + Sync + 'static,
    {
        Self {
            type_name: std::any::type_name::<T>(),
            lifetime,
            factory: Arc::new(move |provider| Arc::new(factory(provider)) as BoxedInstance),
            singleton: OnceLock::new(),
            per_thread: Mutex::new(HashMap::new()),
        }
    }

    pub(crate) fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub(crate) fn lifetime(&self) -> Lifetime {
        self.lifetime
    }

    /// Returns a fresh record sharing this record's factory but carrying a
    /// new lifetime and empty caches.
    pub(crate) fn with_lifetime(&self, lifetime: Lifetime) -> Self {
        Self {
            type_name: self.type_name,
            lifetime,
            factory: Arc::clone(&self.factory),
            singleton: OnceLock::new(),
            per_thread: Mutex::new(HashMap::new()),
        }
    }

    /// Materializes an instance according to the record's lifetime policy.
    ///
    /// Runs without the registry's map lock held; the caller only needs a
    /// `Provider` view so the factory can resolve nested dependencies.
    ///
    /// # Errors
    ///
    /// - `EmptyThreadSlot` if a thread-local slot is missing right after
    ///   initialization (defensive check, expected unreachable).
    pub(crate) fn instance(&self, provider: Provider<'_>) -> Result<BoxedInstance, RegistryError> {
        match self.lifetime {
            Lifetime::Singleton => {
                // get_or_init serializes concurrent first access; the factory
                // runs at most once for the life of this record.
                Ok(Arc::clone(
                    self.singleton.get_or_init(|| (self.factory)(provider)),
                ))
            }
            Lifetime::Instanced => Ok((self.factory)(provider)),
            Lifetime::ThreadLocal => {
                let thread_id = thread::current().id();
                {
                    let slots = self.per_thread.lock().unwrap_or_else(|p| p.into_inner());
                    if let Some(existing) = slots.get(&thread_id) {
                        return Ok(Arc::clone(existing));
                    }
                }

                // The factory runs without the slot lock held. Only the
                // current thread can fill its own slot, so the check above
                // followed by the insert below cannot double-construct.
                let fresh = (self.factory)(provider);

                let mut slots = self.per_thread.lock().unwrap_or_else(|p| p.into_inner());
                slots.entry(thread_id).or_insert(fresh);
                slots
                    .get(&thread_id)
                    .cloned()
                    .ok_or(RegistryError::EmptyThreadSlot {
                        type_name: self.type_name,
                    })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn provider_of(registry: &Registry) -> Provider<'_> {
        registry.provider()
    }

    #[test]
    fn test_lifetime_display() {
        assert_eq!(Lifetime::Singleton.to_string(), "singleton");
        assert_eq!(Lifetime::Instanced.to_string(), "instanced");
        assert_eq!(Lifetime::ThreadLocal.to_string(), "thread-local");
    }

    #[test]
    fn test_singleton_record_caches_first_instance() {
        let registry = Registry::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = calls.clone();

        let record = Registration::new::<String, _>(Lifetime::Singleton, move |_| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
            "cached".to_string()
        });

        let first = record.instance(provider_of(&registry)).unwrap();
        let second = record.instance(provider_of(&registry)).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_instanced_record_invokes_factory_every_time() {
        let registry = Registry::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = calls.clone();

        let record = Registration::new::<String, _>(Lifetime::Instanced, move |_| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
            "fresh".to_string()
        });

        let first = record.instance(provider_of(&registry)).unwrap();
        let second = record.instance(provider_of(&registry)).unwrap();

        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_thread_local_record_caches_per_thread() {
        let registry = Registry::new();
        let record = Registration::new::<u32, _>(Lifetime::ThreadLocal, |_| 7u32);

        let first = record.instance(provider_of(&registry)).unwrap();
        let second = record.instance(provider_of(&registry)).unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        std::thread::scope(|scope| {
            scope.spawn(|| {
                let other = record.instance(provider_of(&registry)).unwrap();
                assert!(!Arc::ptr_eq(&first, &other));
            });
        });
    }

    #[test]
    fn test_with_lifetime_shares_factory_but_drops_cache() {
        let registry = Registry::new();
        let record = Registration::new::<String, _>(Lifetime::Singleton, |_| "value".to_string());

        let cached = record.instance(provider_of(&registry)).unwrap();

        let swapped = record.with_lifetime(Lifetime::Instanced);
        assert_eq!(swapped.lifetime(), Lifetime::Instanced);
        assert_eq!(swapped.type_name(), record.type_name());

        // The swapped record starts with empty caches; the old singleton is gone.
        let fresh = swapped.instance(provider_of(&registry)).unwrap();
        assert!(!Arc::ptr_eq(&cached, &fresh));
    }
}

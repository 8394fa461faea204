//! The registry: a type-indexed map of registrations, safe to share across
//! threads.
//!
//! The map is guarded by a single mutex held only for map access. Instance
//! materialization happens after the lock is released, on the registration
//! record itself, so factories for different types can run concurrently and
//! may resolve further dependencies through the [`Provider`] view they are
//! handed.
//!
//! # Examples
//!
//! ```
//! use lifetime_registry::{ManagerApi, ProviderApi, Registry};
//! use std::sync::Arc;
//!
//! let registry = Registry::new();
//! registry
//!     .register_singleton::<String, _>(|_| "Hello, world!".to_string(), false)
//!     .unwrap();
//!
//! let message: Arc<String> = registry.get_dependency().unwrap();
//! assert_eq!(&*message, "Hello, world!");
//! ```

use std::any::TypeId;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::registration::{BoxedInstance, Lifetime, Registration};
use crate::registry_error::RegistryError;
use crate::registry_event::RegistryEvent;
use crate::registry_trait::{ManagerApi, Provider, ProviderApi};

/// Type alias for the user-supplied tracing callback.
///
/// The callback receives a reference to a `RegistryEvent` every time the
/// registry is interacted with. It must be thread-safe because the registry
/// itself may be shared across threads.
pub type TraceCallback = dyn Fn(&RegistryEvent) + Send + Sync + 'static;

/// A thread-safe dependency-injection registry with per-registration
/// lifetime policies.
///
/// Each type can have exactly one registration, holding a factory and a
/// [`Lifetime`] policy (singleton, instanced, or thread-local). The registry
/// is an owned object: pass it by reference to whatever needs it, or use
/// [`define_container!`](crate::define_container) for a module-level static.
///
/// Entries are never removed; the registry is dropped with its owner, which
/// releases the lock and all cached instances deterministically.
///
/// All operations live on the [`ProviderApi`] and [`ManagerApi`] traits.
pub struct Registry {
    /// CapabilityId -> registration record. Guarded by the one map lock.
    entries: Mutex<HashMap<TypeId, Arc<Registration>>>,
    trace: Mutex<Option<Arc<TraceCallback>>>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            trace: Mutex::new(None),
        }
    }

    /// Returns a read-only [`Provider`] view of this registry.
    ///
    /// Hand this to code that should resolve dependencies but must not be
    /// able to register or mutate them.
    #[must_use]
    pub fn provider(&self) -> Provider<'_> {
        Provider::new(self)
    }

    /// Sets a tracing callback invoked on every registry interaction.
    ///
    /// # Safety Restrictions
    ///
    /// The callback must NOT call event-emitting methods on the same
    /// registry: it is invoked while the trace lock is held, and the lock is
    /// not reentrant.
    pub fn set_trace_callback(&self, callback: impl Fn(&RegistryEvent) + Send + Sync + 'static) {
        let mut guard = self.trace.lock().unwrap_or_else(|p| p.into_inner());
        *guard = Some(Arc::new(callback));
    }

    /// Clears the tracing callback (disables tracing).
    pub fn clear_trace_callback(&self) {
        let mut guard = self.trace.lock().unwrap_or_else(|p| p.into_inner());
        *guard = None;
    }

    /// Emits a registry event through the current callback, if any.
    ///
    /// Never called while the entries lock is held.
    fn emit_event(&self, event: &RegistryEvent) {
        // lock poisoning unlikely; if poisoned, keep emitting with recovered lock
        let guard = self.trace.lock().unwrap_or_else(|p| p.into_inner());
        if let Some(callback) = guard.as_ref() {
            callback(event);
        }
    }

    /// Clones the registration record for `type_id` out of the map.
    ///
    /// The lock is released before the record is asked to materialize
    /// anything.
    fn record(&self, type_id: TypeId) -> Option<Arc<Registration>> {
        self.entries
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .get(&type_id)
            .cloned()
    }

    /// Inserts a registration for `T`, enforcing the reregistration rule
    /// atomically under the map lock.
    fn insert<T: Send + Sync + 'static>(
        &self,
        record: Registration,
        allow_reregister: bool,
    ) -> Result<&Self, RegistryError> {
        let type_name = record.type_name();
        let lifetime = record.lifetime();

        let replaced = {
            let mut entries = self.entries.lock().unwrap_or_else(|p| p.into_inner());
            match entries.entry(TypeId::of::<T>()) {
                Entry::Occupied(mut occupied) => {
                    if !allow_reregister {
                        return Err(RegistryError::AlreadyRegistered { type_name });
                    }
                    // Old record dropped here, cached instances included.
                    occupied.insert(Arc::new(record));
                    true
                }
                Entry::Vacant(vacant) => {
                    vacant.insert(Arc::new(record));
                    false
                }
            }
        };

        self.emit_event(&RegistryEvent::Register {
            type_name,
            lifetime,
            replaced,
        });

        Ok(self)
    }

    /// Looks up `T` and materializes an instance, still type-erased.
    fn resolve_erased<T: Send + Sync + 'static>(
        &self,
    ) -> Result<BoxedInstance, RegistryError> {
        match self.record(TypeId::of::<T>()) {
            Some(record) => record.instance(self.provider()),
            None => Err(RegistryError::NotRegistered {
                type_name: std::any::type_name::<T>(),
            }),
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

/// Downcasts a type-erased instance back to `T`, as a runtime check on the
/// type-erased storage.
fn downcast<T: Send + Sync + 'static>(boxed: BoxedInstance) -> Result<Arc<T>, RegistryError> {
    boxed
        .downcast::<T>()
        .map_err(|_| RegistryError::InstanceTypeMismatch {
            type_name: std::any::type_name::<T>(),
        })
}

impl ProviderApi for Registry {
    fn get_dependency<T: Send + Sync + 'static>(&self) -> Result<Arc<T>, RegistryError> {
        let result = self.resolve_erased::<T>().and_then(downcast::<T>);

        self.emit_event(&RegistryEvent::Resolve {
            type_name: std::any::type_name::<T>(),
            found: result.is_ok(),
        });

        result
    }

    fn try_get_dependency<T: Send + Sync + 'static>(
        &self,
    ) -> Result<Option<Arc<T>>, RegistryError> {
        let result = match self.record(TypeId::of::<T>()) {
            Some(record) => record
                .instance(self.provider())
                .and_then(downcast::<T>)
                .map(Some),
            None => Ok(None),
        };

        self.emit_event(&RegistryEvent::Resolve {
            type_name: std::any::type_name::<T>(),
            found: matches!(result, Ok(Some(_))),
        });

        result
    }

    fn contains<T: Send + Sync + 'static>(&self) -> bool {
        let found = self
            .entries
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .contains_key(&TypeId::of::<T>());

        self.emit_event(&RegistryEvent::Contains {
            type_name: std::any::type_name::<T>(),
            found,
        });

        found
    }
}

impl ManagerApi for Registry {
    fn register_singleton<T, F>(
        &self,
        factory: F,
        allow_reregister: bool,
    ) -> Result<&Self, RegistryError>
    where
        T: Send + Sync + 'static,
        F: for<'r> Fn(Provider<'r>) -> T + Send + Sync + 'static,
    {
        self.insert::<T>(Registration::new::<T, F>(Lifetime::Singleton, factory), allow_reregister)
    }

    fn register_instanced<T, F>(
        &self,
        factory: F,
        allow_reregister: bool,
    ) -> Result<&Self, RegistryError>
    where
        T: Send + Sync + 'static,
        F: for<'r> Fn(Provider<'r>) -> T + Send + Sync + 'static,
    {
        self.insert::<T>(Registration::new::<T, F>(Lifetime::Instanced, factory), allow_reregister)
    }

    fn register_thread_local<T, F>(
        &self,
        factory: F,
        allow_reregister: bool,
    ) -> Result<&Self, RegistryError>
    where
        T: Send + Sync + 'static,
        F: for<'r> Fn(Provider<'r>) -> T + Send + Sync + 'static,
    {
        self.insert::<T>(
            Registration::new::<T, F>(Lifetime::ThreadLocal, factory),
            allow_reregister,
        )
    }

    fn update_lifetime<T: Send + Sync + 'static>(
        &self,
        lifetime: Lifetime,
    ) -> Result<&Self, RegistryError> {
        let type_name = std::any::type_name::<T>();

        {
            let mut entries = self.entries.lock().unwrap_or_else(|p| p.into_inner());
            let slot = entries
                .get_mut(&TypeId::of::<T>())
                .ok_or(RegistryError::NotRegistered { type_name })?;

            // Same lifetime keeps the record (and its cache). A real change
            // swaps in a fresh record sharing the factory, discarding all
            // cached state.
            if slot.lifetime() != lifetime {
                *slot = Arc::new(slot.with_lifetime(lifetime));
            }
        }

        self.emit_event(&RegistryEvent::LifetimeChange {
            type_name,
            lifetime,
        });

        Ok(self)
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------

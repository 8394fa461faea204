//! Capability facets of the registry.
//!
//! Two views are exposed: [`ProviderApi`] covers resolution only, and
//! [`ManagerApi`] additionally covers registration and lifetime changes.
//! Code handed a [`Provider`] (or anything bounded by `ProviderApi` alone)
//! can resolve dependencies but cannot register or mutate them.

use std::sync::Arc;

use crate::registration::Lifetime;
use crate::registry::Registry;
use crate::registry_error::RegistryError;

/// Read-only facet: resolve registered dependencies.
///
/// Implemented by [`Registry`] itself and by the borrowed [`Provider`] view
/// that factories receive.
pub trait ProviderApi {
    /// Resolves an instance of `T` according to its registered lifetime.
    ///
    /// # Errors
    ///
    /// - `NotRegistered` if no registration exists for `T`
    /// - `InstanceTypeMismatch` / `EmptyThreadSlot` on internal invariant
    ///   failures (expected unreachable)
    fn get_dependency<T: Send + Sync + 'static>(&self) -> Result<Arc<T>, RegistryError>;

    /// Like [`get_dependency`](Self::get_dependency), but an unregistered
    /// type yields `Ok(None)` instead of an error. Internal invariant
    /// failures still propagate.
    fn try_get_dependency<T: Send + Sync + 'static>(&self)
        -> Result<Option<Arc<T>>, RegistryError>;

    /// Returns `true` if a registration exists for `T`.
    fn contains<T: Send + Sync + 'static>(&self) -> bool;

    /// Alias of [`get_dependency`](Self::get_dependency).
    fn get<T: Send + Sync + 'static>(&self) -> Result<Arc<T>, RegistryError> {
        self.get_dependency::<T>()
    }
}

/// Full facet: everything [`ProviderApi`] offers, plus registration and
/// lifetime management.
pub trait ManagerApi: ProviderApi {
    /// Registers `T` with a lazily invoked factory producing one shared
    /// instance for the whole registry.
    ///
    /// Returns `&Self` on success so registrations can be chained with `?`.
    ///
    /// The factory runs at most once, even under concurrent first access. A
    /// singleton factory must not resolve its own type through the provider
    /// it receives; doing so deadlocks inside the once-initialization.
    ///
    /// # Errors
    ///
    /// `AlreadyRegistered` if `T` is registered and `allow_reregister` is
    /// `false`; the existing registration is left untouched. With
    /// `allow_reregister == true` the old registration is replaced outright
    /// and its cached state discarded.
    fn register_singleton<T, F>(
        &self,
        factory: F,
        allow_reregister: bool,
    ) -> Result<&Self, RegistryError>
    where
        T: Send + Sync + 'static,
        F: for<'r> Fn(Provider<'r>) -> T + Send + Sync + 'static;

    /// Registers `T` with a factory invoked on every resolution; each call
    /// yields a fresh instance.
    ///
    /// # Errors
    ///
    /// Same reregistration rules as
    /// [`register_singleton`](Self::register_singleton).
    fn register_instanced<T, F>(
        &self,
        factory: F,
        allow_reregister: bool,
    ) -> Result<&Self, RegistryError>
    where
        T: Send + Sync + 'static,
        F: for<'r> Fn(Provider<'r>) -> T + Send + Sync + 'static;

    /// Registers `T` with a factory invoked lazily once per calling thread.
    ///
    /// # Errors
    ///
    /// Same reregistration rules as
    /// [`register_singleton`](Self::register_singleton).
    fn register_thread_local<T, F>(
        &self,
        factory: F,
        allow_reregister: bool,
    ) -> Result<&Self, RegistryError>
    where
        T: Send + Sync + 'static,
        F: for<'r> Fn(Provider<'r>) -> T + Send + Sync + 'static;

    /// Changes the lifetime policy of an existing registration.
    ///
    /// Cached state is discarded: the registration keeps its factory but
    /// starts over with empty caches under the new policy. Setting the
    /// lifetime a registration already has is a no-op and keeps the cache.
    ///
    /// # Errors
    ///
    /// `NotRegistered` if no registration exists for `T`.
    fn update_lifetime<T: Send + Sync + 'static>(
        &self,
        lifetime: Lifetime,
    ) -> Result<&Self, RegistryError>;
}

/// Borrowed read-only view of a [`Registry`].
///
/// This is what factories receive, so a dependency graph can be resolved
/// recursively during construction without granting factories the ability
/// to register or mutate anything. The borrow cannot outlive the resolution
/// call, so the view never keeps the registry alive.
#[derive(Clone, Copy)]
pub struct Provider<'a> {
    registry: &'a Registry,
}

impl<'a> Provider<'a> {
    pub(crate) fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }
}

impl ProviderApi for Provider<'_> {
    fn get_dependency<T: Send + Sync + 'static>(&self) -> Result<Arc<T>, RegistryError> {
        self.registry.get_dependency::<T>()
    }

    fn try_get_dependency<T: Send + Sync + 'static>(
        &self,
    ) -> Result<Option<Arc<T>>, RegistryError> {
        self.registry.try_get_dependency::<T>()
    }

    fn contains<T: Send + Sync + 'static>(&self) -> bool {
        self.registry.contains::<T>()
    }
}

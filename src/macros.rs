//! Macro for creating named module-level containers.
//!
//! The core [`Registry`](crate::Registry) is an owned object; this macro is
//! the opt-in convenience for code that wants a process-wide container
//! reachable through free functions.

/// Creates an isolated module-level container with a single macro invocation.
///
/// The macro generates a module containing:
/// - A lazily initialized [`Registry`](crate::Registry) static (hidden)
/// - Free functions delegating to it
///
/// # Examples
///
/// ```rust
/// use lifetime_registry::define_container;
/// use std::sync::Arc;
///
/// // Create a container
/// define_container!(app);
///
/// // Register factories under a lifetime policy
/// app::register_singleton::<String, _>(|_| "Hello".to_string(), false).unwrap();
/// app::register_instanced::<i32, _>(|_| 42, false).unwrap();
///
/// // Resolve instances
/// let msg: Arc<String> = app::get_dependency().unwrap();
/// let num: Arc<i32> = app::get().unwrap();
///
/// assert_eq!(&**msg, "Hello");
/// assert_eq!(*num, 42);
/// ```
///
/// # Multiple Containers
///
/// Each invocation creates a fully isolated container:
///
/// ```rust
/// use lifetime_registry::define_container;
///
/// define_container!(database);
/// define_container!(cache);
///
/// database::register_singleton::<String, _>(|_| "db".to_string(), false).unwrap();
/// cache::register_singleton::<String, _>(|_| "redis".to_string(), false).unwrap();
///
/// assert_eq!(&**database::get::<String>().unwrap(), "db");
/// assert_eq!(&**cache::get::<String>().unwrap(), "redis");
/// ```
///
/// # Direct Registry Access
///
/// The underlying registry is reachable with `registry()`, e.g. to hand out
/// a provider-only view:
///
/// ```rust
/// use lifetime_registry::{define_container, ProviderApi};
///
/// define_container!(services);
///
/// services::register_singleton::<u8, _>(|_| 7u8, false).unwrap();
/// let provider = services::registry().provider();
/// assert_eq!(*provider.get_dependency::<u8>().unwrap(), 7);
/// ```
#[macro_export]
macro_rules! define_container {
    ($name:ident) => {
        pub mod $name {
            use std::sync::{Arc, LazyLock};

            // The container itself (module-private)
            static CONTAINER: LazyLock<$crate::Registry> =
                LazyLock::new($crate::Registry::new);

            /// Borrow the underlying registry.
            pub fn registry() -> &'static $crate::Registry {
                &CONTAINER
            }

            /// Register a singleton factory for `T`.
            pub fn register_singleton<T, F>(
                factory: F,
                allow_reregister: bool,
            ) -> Result<&'static $crate::Registry, $crate::RegistryError>
            where
                T: Send + Sync + 'static,
                F: for<'r> Fn($crate::Provider<'r>) -> T + Send + Sync + 'static,
            {
                use $crate::ManagerApi;
                CONTAINER.register_singleton::<T, F>(factory, allow_reregister)
            }

            /// Register a per-call factory for `T`.
            pub fn register_instanced<T, F>(
                factory: F,
                allow_reregister: bool,
            ) -> Result<&'static $crate::Registry, $crate::RegistryError>
            where
                T: Send + Sync + 'static,
                F: for<'r> Fn($crate::Provider<'r>) -> T + Send + Sync + 'static,
            {
                use $crate::ManagerApi;
                CONTAINER.register_instanced::<T, F>(factory, allow_reregister)
            }

            /// Register a per-thread factory for `T`.
            pub fn register_thread_local<T, F>(
                factory: F,
                allow_reregister: bool,
            ) -> Result<&'static $crate::Registry, $crate::RegistryError>
            where
                T: Send + Sync + 'static,
                F: for<'r> Fn($crate::Provider<'r>) -> T + Send + Sync + 'static,
            {
                use $crate::ManagerApi;
                CONTAINER.register_thread_local::<T, F>(factory, allow_reregister)
            }

            /// Change the lifetime policy of an existing registration.
            pub fn update_lifetime<T: Send + Sync + 'static>(
                lifetime: $crate::Lifetime,
            ) -> Result<&'static $crate::Registry, $crate::RegistryError> {
                use $crate::ManagerApi;
                CONTAINER.update_lifetime::<T>(lifetime)
            }

            /// Resolve an instance of `T`.
            pub fn get_dependency<T: Send + Sync + 'static>(
            ) -> Result<Arc<T>, $crate::RegistryError> {
                use $crate::ProviderApi;
                CONTAINER.get_dependency::<T>()
            }

            /// Resolve an instance of `T`; unregistered types yield `None`.
            pub fn try_get_dependency<T: Send + Sync + 'static>(
            ) -> Result<Option<Arc<T>>, $crate::RegistryError> {
                use $crate::ProviderApi;
                CONTAINER.try_get_dependency::<T>()
            }

            /// Alias of `get_dependency`.
            pub fn get<T: Send + Sync + 'static>() -> Result<Arc<T>, $crate::RegistryError> {
                use $crate::ProviderApi;
                CONTAINER.get::<T>()
            }

            /// Check if a registration exists for `T`.
            pub fn contains<T: Send + Sync + 'static>() -> bool {
                use $crate::ProviderApi;
                CONTAINER.contains::<T>()
            }

            /// Set a tracing callback for container operations.
            pub fn set_trace_callback(
                callback: impl Fn(&$crate::RegistryEvent) + Send + Sync + 'static,
            ) {
                CONTAINER.set_trace_callback(callback)
            }

            /// Clear the tracing callback.
            pub fn clear_trace_callback() {
                CONTAINER.clear_trace_callback()
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    #[test]
    fn test_define_container_macro() {
        define_container!(test_container);

        test_container::register_singleton::<i32, _>(|_| 100, false).unwrap();
        let value: Arc<i32> = test_container::get().unwrap();
        assert_eq!(*value, 100);

        assert!(test_container::contains::<i32>());
        assert!(!test_container::contains::<f64>());
    }

    #[test]
    fn test_multiple_containers_are_isolated() {
        define_container!(container_a);
        define_container!(container_b);

        container_a::register_singleton::<i32, _>(|_| 1, false).unwrap();
        container_b::register_singleton::<i32, _>(|_| 2, false).unwrap();

        assert_eq!(*container_a::get::<i32>().unwrap(), 1);
        assert_eq!(*container_b::get::<i32>().unwrap(), 2);
    }

    #[test]
    fn test_container_tracing() {
        define_container!(traced);

        use std::sync::Mutex;
        let events = Arc::new(Mutex::new(Vec::new()));
        let events_clone = events.clone();

        traced::set_trace_callback(move |event| {
            events_clone.lock().unwrap().push(format!("{}", event));
        });

        traced::register_instanced::<i32, _>(|_| 42, false).unwrap();
        let _: Arc<i32> = traced::get().unwrap();
        let _ = traced::contains::<i32>();

        let recorded = events.lock().unwrap();
        assert_eq!(recorded.len(), 3);
        assert!(recorded[0].contains("register"));
        assert!(recorded[1].contains("resolve"));
        assert!(recorded[2].contains("contains"));
    }
}

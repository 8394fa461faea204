use crate::registration::Lifetime;

/// Events emitted by the registry during operations.
///
/// These events are passed to the tracing callback set via
/// `Registry::set_trace_callback`. The `Clone` derive allows callbacks to
/// store or forward events if needed.
///
/// # Examples
///
/// ```rust
/// use lifetime_registry::{Lifetime, RegistryEvent};
///
/// let event = RegistryEvent::Register {
///     type_name: "i32",
///     lifetime: Lifetime::Singleton,
///     replaced: false,
/// };
/// println!("{:?}", event);
/// ```
#[derive(Debug, Clone)]
pub enum RegistryEvent {
    /// A registration was inserted (or, with permission, replaced).
    Register {
        /// The type name of the registered capability (e.g., "i32")
        type_name: &'static str,
        /// The lifetime policy the type was registered under
        lifetime: Lifetime,
        /// Whether an existing registration was replaced
        replaced: bool,
    },

    /// An instance was requested, via `get_dependency` or `try_get_dependency`.
    Resolve {
        /// The type name that was requested
        type_name: &'static str,
        /// Whether an instance was produced
        found: bool,
    },

    /// A type existence check was performed.
    Contains {
        /// The type name that was checked
        type_name: &'static str,
        /// Whether the type is registered
        found: bool,
    },

    /// A registration's lifetime policy was changed.
    LifetimeChange {
        /// The type name whose lifetime changed
        type_name: &'static str,
        /// The new lifetime policy
        lifetime: Lifetime,
    },
}

impl std::fmt::Display for RegistryEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryEvent::Register {
                type_name,
                lifetime,
                replaced,
            } => {
                write!(
                    f,
                    "register {{ type_name: {}, lifetime: {}, replaced: {} }}",
                    type_name, lifetime, replaced
                )
            }
            RegistryEvent::Resolve { type_name, found } => {
                write!(f, "resolve {{ type_name: {}, found: {} }}", type_name, found)
            }
            RegistryEvent::Contains { type_name, found } => {
                write!(
                    f,
                    "contains {{ type_name: {}, found: {} }}",
                    type_name, found
                )
            }
            RegistryEvent::LifetimeChange {
                type_name,
                lifetime,
            } => {
                write!(
                    f,
                    "lifetime_change {{ type_name: {}, lifetime: {} }}",
                    type_name, lifetime
                )
            }
        }
    }
}

use thiserror::Error;

/// Errors raised by registry operations.
///
/// Every variant carries the diagnostic name of the type involved, as
/// produced by `std::any::type_name`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// No registration exists for the requested type.
    #[error("no registration found for type: {type_name}")]
    NotRegistered {
        /// Name of the requested type.
        type_name: &'static str,
    },

    /// A registration already exists and reregistration was not permitted.
    #[error("type is already registered: {type_name}")]
    AlreadyRegistered {
        /// Name of the type being registered.
        type_name: &'static str,
    },

    /// A stored instance failed the downcast back to its concrete type.
    ///
    /// Unreachable through the typed API, which keys the map by the same
    /// type the factory produces. Kept as a runtime check on the type-erased
    /// storage.
    #[error("stored instance does not match requested type: {type_name}")]
    InstanceTypeMismatch {
        /// Name of the requested type.
        type_name: &'static str,
    },

    /// A thread-local slot was empty right after initialization.
    ///
    /// Defensive internal check; expected unreachable.
    #[error("thread-local slot empty after initialization for type: {type_name}")]
    EmptyThreadSlot {
        /// Name of the requested type.
        type_name: &'static str,
    },
}

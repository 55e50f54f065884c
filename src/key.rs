//! Service key types for the service registry.

use std::any::TypeId;

/// Key for service storage and lookup.
///
/// Concrete types are keyed by `TypeId`; trait objects, which have no
/// `TypeId` of their own, by their type name.
///
/// # Examples
///
/// ```rust
/// use ferrous_caconfig::{Key, Resolver, ServiceRegistry};
/// use std::sync::Arc;
///
/// trait Greeter: Send + Sync {
///     fn greet(&self) -> &str;
/// }
///
/// struct Hello;
/// impl Greeter for Hello {
///     fn greet(&self) -> &str { "hello" }
/// }
///
/// let registry = ServiceRegistry::new();
/// registry.register_singleton(42u32, 0);
/// let reference = registry.register_trait::<dyn Greeter>(Arc::new(Hello), 0);
///
/// assert_eq!(*registry.get::<u32>().unwrap(), 42);          // Type key
/// assert_eq!(registry.get_trait::<dyn Greeter>().unwrap().greet(), "hello"); // Trait key
/// assert_eq!(reference.key(), &Key::Trait(std::any::type_name::<dyn Greeter>()));
/// ```
#[derive(Debug, Clone, Copy)]
pub enum Key {
    /// Concrete type key with TypeId and name for diagnostics
    Type(TypeId, &'static str),
    /// Trait object key
    Trait(&'static str),
}

impl Key {
    /// Get the type or trait name for display
    pub fn display_name(&self) -> &'static str {
        match self {
            Key::Type(_, name) => name,
            Key::Trait(name) => name,
        }
    }
}

// TypeId-only comparison for concrete types
impl PartialEq for Key {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Key::Type(a, _), Key::Type(b, _)) => a == b,
            (Key::Trait(a), Key::Trait(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Key {}

impl std::hash::Hash for Key {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        match self {
            Key::Type(id, _) => {
                0u8.hash(state);
                id.hash(state);
            }
            Key::Trait(name) => {
                1u8.hash(state);
                name.hash(state);
            }
        }
    }
}

#[inline]
pub fn key_of_type<T: 'static>() -> Key {
    Key::Type(TypeId::of::<T>(), std::any::type_name::<T>())
}

#[inline]
pub fn key_of_trait<T: ?Sized + 'static>() -> Key {
    Key::Trait(std::any::type_name::<T>())
}

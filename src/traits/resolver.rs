//! Resolver traits for service lookup.

use std::any::{Any, TypeId};
use std::sync::Arc;

use crate::error::{DiError, DiResult};
use crate::key::Key;

/// Core resolver trait for object-safe service lookup.
///
/// Most users should use the [`Resolver`] trait instead, which provides
/// typed generic methods built on top of this trait.
pub trait ResolverCore: Send + Sync {
    /// Returns the highest ranked service registered under `key`.
    fn resolve_any(&self, key: &Key) -> DiResult<Arc<dyn Any + Send + Sync>>;

    /// Returns every service registered under `key`, highest ranking first.
    ///
    /// Unknown keys yield an empty vector.
    fn resolve_many(&self, key: &Key) -> Vec<Arc<dyn Any + Send + Sync>>;
}

/// High-level resolver interface with typed lookup methods.
///
/// # Examples
///
/// ```
/// use ferrous_caconfig::{Resolver, ServiceRegistry};
/// use std::sync::Arc;
///
/// trait Plugin: Send + Sync {
///     fn name(&self) -> &str;
/// }
///
/// struct PluginA;
/// impl Plugin for PluginA {
///     fn name(&self) -> &str { "Plugin A" }
/// }
///
/// struct PluginB;
/// impl Plugin for PluginB {
///     fn name(&self) -> &str { "Plugin B" }
/// }
///
/// let registry = ServiceRegistry::new();
/// registry.register_trait::<dyn Plugin>(Arc::new(PluginA), 10);
/// registry.register_trait::<dyn Plugin>(Arc::new(PluginB), 100);
///
/// // highest ranking wins
/// assert_eq!(registry.get_trait::<dyn Plugin>().unwrap().name(), "Plugin B");
///
/// let plugins = registry.get_all_trait::<dyn Plugin>().unwrap();
/// assert_eq!(plugins.len(), 2);
/// assert_eq!(plugins[0].name(), "Plugin B");
/// assert_eq!(plugins[1].name(), "Plugin A");
/// ```
pub trait Resolver: ResolverCore {
    /// Resolves a concrete service type.
    fn get<T: 'static + Send + Sync>(&self) -> DiResult<Arc<T>> {
        let key = Key::Type(TypeId::of::<T>(), std::any::type_name::<T>());
        let any = self.resolve_any(&key)?;
        any.downcast::<T>()
            .map_err(|_| DiError::TypeMismatch(std::any::type_name::<T>()))
    }

    /// Resolves the highest ranked implementation of a trait.
    fn get_trait<T: ?Sized + 'static + Send + Sync>(&self) -> DiResult<Arc<T>> {
        let key = Key::Trait(std::any::type_name::<T>());
        let any = self.resolve_any(&key)?;
        // trait objects are stored as Arc<Arc<dyn Trait>>
        any.downcast::<Arc<T>>()
            .map(|boxed| (*boxed).clone())
            .map_err(|_| DiError::TypeMismatch(std::any::type_name::<T>()))
    }

    /// Resolves every implementation of a trait, highest ranking first.
    fn get_all_trait<T: ?Sized + 'static + Send + Sync>(&self) -> DiResult<Vec<Arc<T>>> {
        let key = Key::Trait(std::any::type_name::<T>());
        self.resolve_many(&key)
            .into_iter()
            .map(|any| {
                any.downcast::<Arc<T>>()
                    .map(|boxed| (*boxed).clone())
                    .map_err(|_| DiError::TypeMismatch(std::any::type_name::<T>()))
            })
            .collect()
    }
}

impl<R: ResolverCore + ?Sized> Resolver for R {}

//! Ranked service registry.
//!
//! Services are published under a [`Key`] with a ranking. Single lookups
//! return the highest ranked service; multi lookups return every service,
//! highest ranking first. Equal rankings keep registration order.

use std::any::{Any, TypeId};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::trace;

use crate::error::{DiError, DiResult};
use crate::key::Key;
use crate::traits::ResolverCore;

// Type-erased Arc for storage
pub(crate) type AnyArc = Arc<dyn Any + Send + Sync>;

/// Identifier assigned to a registration, increasing in registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ServiceId(u64);

impl ServiceId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Descriptor of a published service, used to unregister it and for
/// introspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceReference {
    id: ServiceId,
    key: Key,
    ranking: i32,
    impl_type_name: Option<&'static str>,
}

impl ServiceReference {
    pub fn id(&self) -> ServiceId {
        self.id
    }

    pub fn key(&self) -> &Key {
        &self.key
    }

    pub fn ranking(&self) -> i32 {
        self.ranking
    }

    /// Implementation type, known for concrete registrations only.
    pub fn impl_type_name(&self) -> Option<&'static str> {
        self.impl_type_name
    }

    /// Ordering used for lookups: higher ranking first, then older first.
    fn precedence(&self, other: &Self) -> std::cmp::Ordering {
        other
            .ranking
            .cmp(&self.ranking)
            .then_with(|| self.id.cmp(&other.id))
    }
}

struct Registration {
    reference: ServiceReference,
    service: AnyArc,
}

struct RegistryInner {
    registrations: RwLock<Vec<Registration>>,
    next_id: AtomicU64,
}

/// Service registry shared between publishers and consumers.
///
/// Cheap to clone; clones share the same registrations. Registrations may
/// be added and removed at any time.
///
/// # Examples
///
/// ```rust
/// use ferrous_caconfig::{Resolver, ServiceRegistry};
///
/// let registry = ServiceRegistry::new();
/// let low = registry.register_singleton("low".to_string(), 1);
/// registry.register_singleton("high".to_string(), 5);
/// assert_eq!(*registry.get::<String>().unwrap(), "high");
///
/// assert!(registry.unregister(&low));
/// assert!(!registry.unregister(&low));
/// assert_eq!(registry.references().len(), 1);
/// ```
#[derive(Clone)]
pub struct ServiceRegistry {
    inner: Arc<RegistryInner>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RegistryInner {
                registrations: RwLock::new(Vec::new()),
                next_id: AtomicU64::new(1),
            }),
        }
    }

    /// Publishes a concrete value.
    pub fn register_singleton<T: 'static + Send + Sync>(&self, value: T, ranking: i32) -> ServiceReference {
        let key = Key::Type(TypeId::of::<T>(), std::any::type_name::<T>());
        self.insert(key, Arc::new(value), ranking, Some(std::any::type_name::<T>()))
    }

    /// Publishes a trait implementation.
    pub fn register_trait<T>(&self, service: Arc<T>, ranking: i32) -> ServiceReference
    where
        T: ?Sized + 'static + Send + Sync,
    {
        let key = Key::Trait(std::any::type_name::<T>());
        // stored as Arc<Arc<dyn Trait>> so it fits in Any
        let any_arc: AnyArc = Arc::new(service);
        self.insert(key, any_arc, ranking, None)
    }

    /// Removes a registration; `false` if it was already gone.
    pub fn unregister(&self, reference: &ServiceReference) -> bool {
        let mut registrations = self.inner.registrations.write();
        let before = registrations.len();
        registrations.retain(|r| r.reference.id != reference.id);
        let removed = registrations.len() != before;
        if removed {
            trace!(service = reference.key.display_name(), id = reference.id.0, "service unregistered");
        }
        removed
    }

    /// All current registrations in lookup order.
    pub fn references(&self) -> Vec<ServiceReference> {
        let mut references: Vec<ServiceReference> = self
            .inner
            .registrations
            .read()
            .iter()
            .map(|r| r.reference.clone())
            .collect();
        references.sort_by(|a, b| a.precedence(b));
        references
    }

    pub fn contains(&self, key: &Key) -> bool {
        self.inner
            .registrations
            .read()
            .iter()
            .any(|r| &r.reference.key == key)
    }

    pub(crate) fn insert(
        &self,
        key: Key,
        service: AnyArc,
        ranking: i32,
        impl_type_name: Option<&'static str>,
    ) -> ServiceReference {
        let id = ServiceId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        let reference = ServiceReference {
            id,
            key,
            ranking,
            impl_type_name,
        };
        trace!(service = key.display_name(), id = id.0, ranking, "service registered");
        self.inner.registrations.write().push(Registration {
            reference: reference.clone(),
            service,
        });
        reference
    }

    fn matching(&self, key: &Key) -> Vec<(ServiceReference, AnyArc)> {
        let mut matches: Vec<(ServiceReference, AnyArc)> = self
            .inner
            .registrations
            .read()
            .iter()
            .filter(|r| &r.reference.key == key)
            .map(|r| (r.reference.clone(), r.service.clone()))
            .collect();
        matches.sort_by(|a, b| a.0.precedence(&b.0));
        matches
    }
}

impl Default for ServiceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolverCore for ServiceRegistry {
    fn resolve_any(&self, key: &Key) -> DiResult<AnyArc> {
        self.matching(key)
            .into_iter()
            .next()
            .map(|(_, service)| service)
            .ok_or(DiError::NotFound(key.display_name()))
    }

    fn resolve_many(&self, key: &Key) -> Vec<AnyArc> {
        self.matching(key)
            .into_iter()
            .map(|(_, service)| service)
            .collect()
    }
}

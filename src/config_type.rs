//! Configuration target types.
//!
//! A [`ConfigType`] is the type-erased description of the class an
//! injection point asks for: the raw [`ValueMap`] view, a configuration
//! schema (a type implementing [`Configuration`]), or any other type that
//! can be built from a configuration's properties.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::error::{ConfigurationResolveError, ResolveResult};
use crate::value_map::ValueMap;

/// Marker for configuration schema types.
///
/// A schema type carries an implicit configuration name, used whenever the
/// injection point does not name a configuration explicitly. Properties
/// missing from the stored configuration should fall back to defaults
/// (`#[serde(default)]`).
///
/// # Examples
///
/// ```rust
/// use ferrous_caconfig::Configuration;
/// use serde::Deserialize;
///
/// #[derive(Debug, Default, Deserialize)]
/// #[serde(default, rename_all = "camelCase")]
/// struct SingleConfig {
///     string_param: String,
///     int_param: i32,
/// }
///
/// impl Configuration for SingleConfig {
///     const NAME: &'static str = "app.SingleConfig";
/// }
/// ```
pub trait Configuration: DeserializeOwned + Send + Sync + 'static {
    /// Implicit configuration name.
    const NAME: &'static str;
}

/// How a target class is produced from a configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKind {
    /// The raw key/value view itself.
    ValueMap,
    /// A schema type with its implicit name.
    Schema { name: &'static str },
    /// Any other type built from the raw view.
    Adaptable,
}

type Constructor = fn(&ValueMap) -> ResolveResult<ConfigObject>;

/// Type-erased descriptor of a requested configuration class.
#[derive(Clone, Copy)]
pub struct ConfigType {
    type_id: TypeId,
    type_name: &'static str,
    kind: ConfigKind,
    construct: Constructor,
}

impl ConfigType {
    /// The raw [`ValueMap`] view.
    pub fn value_map() -> Self {
        Self {
            type_id: TypeId::of::<ValueMap>(),
            type_name: std::any::type_name::<ValueMap>(),
            kind: ConfigKind::ValueMap,
            construct: construct_value_map,
        }
    }

    /// A configuration schema type.
    pub fn schema<T: Configuration>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            kind: ConfigKind::Schema { name: T::NAME },
            construct: construct_schema::<T>,
        }
    }

    /// A plain type built from the configuration's properties.
    pub fn adaptable<T: DeserializeOwned + Send + Sync + 'static>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            kind: ConfigKind::Adaptable,
            construct: construct_adaptable::<T>,
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn kind(&self) -> ConfigKind {
        self.kind
    }

    pub fn is_value_map(&self) -> bool {
        self.type_id == TypeId::of::<ValueMap>()
    }

    pub fn is_schema(&self) -> bool {
        matches!(self.kind, ConfigKind::Schema { .. })
    }

    /// Implicit configuration name of a schema type.
    pub fn schema_name(&self) -> Option<&'static str> {
        match self.kind {
            ConfigKind::Schema { name } => Some(name),
            _ => None,
        }
    }

    /// Builds an instance from a configuration's properties.
    pub fn construct(&self, properties: &ValueMap) -> ResolveResult<ConfigObject> {
        (self.construct)(properties)
    }
}

impl PartialEq for ConfigType {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id && self.kind == other.kind
    }
}

impl Eq for ConfigType {}

impl fmt::Debug for ConfigType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigType")
            .field("type_name", &self.type_name)
            .field("kind", &self.kind)
            .finish()
    }
}

fn construct_value_map(properties: &ValueMap) -> ResolveResult<ConfigObject> {
    Ok(ConfigObject::new(properties.clone()))
}

fn construct_schema<T: Configuration>(properties: &ValueMap) -> ResolveResult<ConfigObject> {
    properties
        .deserialize_into::<T>()
        .map(ConfigObject::new)
        .map_err(|e| {
            ConfigurationResolveError::new(format!(
                "Unable to map configuration '{}': {}",
                T::NAME,
                e
            ))
        })
}

fn construct_adaptable<T: DeserializeOwned + Send + Sync + 'static>(
    properties: &ValueMap,
) -> ResolveResult<ConfigObject> {
    properties
        .deserialize_into::<T>()
        .map(ConfigObject::new)
        .map_err(|e| {
            ConfigurationResolveError::new(format!(
                "Unable to adapt configuration to {}: {}",
                std::any::type_name::<T>(),
                e
            ))
        })
}

/// A produced configuration value.
///
/// Cheap to clone. Callers downcast it to the type they asked for.
///
/// ```rust
/// use ferrous_caconfig::{ConfigObject, ValueMap};
///
/// let object = ConfigObject::new(ValueMap::new().with("a", 1));
/// assert!(object.is::<ValueMap>());
/// assert_eq!(object.downcast_ref::<ValueMap>().unwrap().get::<i32>("a"), Some(1));
/// assert!(object.downcast::<String>().is_none());
/// ```
#[derive(Clone)]
pub struct ConfigObject {
    inner: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl ConfigObject {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            inner: Arc::new(value),
            type_name: std::any::type_name::<T>(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn is<T: Any>(&self) -> bool {
        self.inner.is::<T>()
    }

    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.inner.clone().downcast::<T>().ok()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }
}

impl fmt::Debug for ConfigObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ConfigObject").field(&self.type_name).finish()
    }
}

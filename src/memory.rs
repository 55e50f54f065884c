//! In-memory configuration resolution engine.
//!
//! Configurations live in buckets addressed by path (`/conf/...`). A
//! content resource finds its bucket through the nearest
//! [`sling:configRef`](crate::resource::CONFIG_REF_PROPERTY) on itself or
//! its ancestors. Lookups then fall back to the bucket's parents and the
//! global buckets.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::config_type::{ConfigObject, ConfigType, Configuration};
use crate::engine::{ConfigurationBuilder, ConfigurationResolver};
use crate::error::{ConfigurationResolveError, ResolveResult};
use crate::resource::{parent_path, Resource, ResourceTree};
use crate::value_map::ValueMap;

/// Buckets consulted after the resource's own bucket and its parents.
pub const FALLBACK_BUCKETS: [&str; 3] = ["/conf/global", "/apps/conf", "/libs/conf"];

#[derive(Debug, Default)]
struct Store {
    singles: HashMap<(String, String), ValueMap>,
    collections: HashMap<(String, String), Vec<ValueMap>>,
}

/// Reference [`ConfigurationResolver`] backed by a [`ResourceTree`].
///
/// # Examples
///
/// ```rust
/// use ferrous_caconfig::{ConfigurationResolver, MemoryConfigurationResolver, ResourceTree, ValueMap};
///
/// let tree = ResourceTree::new();
/// tree.create("/content/site", ValueMap::new().with("sling:configRef", "/conf/site"));
/// let page = tree.create("/content/site/en", ValueMap::new());
///
/// let resolver = MemoryConfigurationResolver::new(tree);
/// resolver
///     .write_configuration("/content/site", "app.Settings", ValueMap::new().with("title", "Site"))
///     .unwrap();
///
/// let settings = resolver.get(&page).name("app.Settings").as_value_map().unwrap();
/// assert_eq!(settings.get::<String>("title").as_deref(), Some("Site"));
/// ```
#[derive(Debug, Clone)]
pub struct MemoryConfigurationResolver {
    tree: ResourceTree,
    store: Arc<RwLock<Store>>,
}

impl MemoryConfigurationResolver {
    pub fn new(tree: ResourceTree) -> Self {
        Self {
            tree,
            store: Arc::new(RwLock::new(Store::default())),
        }
    }

    pub fn tree(&self) -> &ResourceTree {
        &self.tree
    }

    /// Bucket path referenced by the resource at `path` or its nearest ancestor.
    pub fn config_ref(&self, path: &str) -> Option<String> {
        self.tree
            .ancestors(path)
            .iter()
            .find_map(Resource::config_ref)
    }

    /// Stores a single configuration for the context at `context_path`.
    pub fn write_configuration(
        &self,
        context_path: &str,
        name: &str,
        properties: ValueMap,
    ) -> ResolveResult<()> {
        let bucket = self.bucket_for(context_path)?;
        trace!(bucket = %bucket, config_name = name, "writing configuration");
        self.store
            .write()
            .singles
            .insert((bucket, name.to_string()), properties);
        Ok(())
    }

    /// Stores a configuration collection for the context at `context_path`.
    pub fn write_configuration_collection(
        &self,
        context_path: &str,
        name: &str,
        items: impl IntoIterator<Item = ValueMap>,
    ) -> ResolveResult<()> {
        let bucket = self.bucket_for(context_path)?;
        let items: Vec<ValueMap> = items.into_iter().collect();
        trace!(bucket = %bucket, config_name = name, items = items.len(), "writing configuration collection");
        self.store
            .write()
            .collections
            .insert((bucket, name.to_string()), items);
        Ok(())
    }

    /// Stores a single configuration under the schema's implicit name.
    pub fn write_schema<T: Configuration>(
        &self,
        context_path: &str,
        properties: ValueMap,
    ) -> ResolveResult<()> {
        self.write_configuration(context_path, T::NAME, properties)
    }

    /// Stores a configuration collection under the schema's implicit name.
    pub fn write_schema_collection<T: Configuration>(
        &self,
        context_path: &str,
        items: impl IntoIterator<Item = ValueMap>,
    ) -> ResolveResult<()> {
        self.write_configuration_collection(context_path, T::NAME, items)
    }

    fn bucket_for(&self, context_path: &str) -> ResolveResult<String> {
        self.config_ref(context_path).ok_or_else(|| {
            ConfigurationResolveError::new(format!(
                "No context with a configuration reference found at {}",
                context_path
            ))
        })
    }
}

impl ConfigurationResolver for MemoryConfigurationResolver {
    fn get(&self, resource: &Resource) -> Box<dyn ConfigurationBuilder> {
        let config_ref = resource
            .config_ref()
            .or_else(|| self.config_ref(resource.path()));
        debug!(resource = resource.path(), config_ref = ?config_ref, "configuration builder created");
        Box::new(MemoryConfigurationBuilder {
            store: self.store.clone(),
            config_ref,
            name: None,
        })
    }
}

struct MemoryConfigurationBuilder {
    store: Arc<RwLock<Store>>,
    config_ref: Option<String>,
    name: Option<String>,
}

impl MemoryConfigurationBuilder {
    /// Buckets in lookup order, nearest first.
    fn buckets(&self) -> Vec<String> {
        let mut buckets = Vec::new();
        let mut current = self.config_ref.as_deref();
        while let Some(path) = current {
            if path == "/" {
                break;
            }
            buckets.push(path.to_string());
            current = parent_path(path);
        }
        for fallback in FALLBACK_BUCKETS {
            if !buckets.iter().any(|b| b == fallback) {
                buckets.push(fallback.to_string());
            }
        }
        buckets
    }

    fn required_name(&self) -> ResolveResult<&str> {
        self.name
            .as_deref()
            .ok_or_else(|| ConfigurationResolveError::new("Configuration name is required."))
    }

    fn schema_name<'a>(&'a self, ty: &ConfigType) -> ResolveResult<&'a str> {
        if !ty.is_schema() {
            return Err(ConfigurationResolveError::new(format!(
                "{} is not a configuration schema",
                ty.type_name()
            )));
        }
        match (self.name.as_deref(), ty.schema_name()) {
            (Some(name), _) => Ok(name),
            (None, Some(name)) => Ok(name),
            (None, None) => Err(ConfigurationResolveError::new("Configuration name is required.")),
        }
    }

    fn single(&self, name: &str) -> Option<ValueMap> {
        let store = self.store.read();
        self.buckets()
            .into_iter()
            .find_map(|bucket| store.singles.get(&(bucket, name.to_string())).cloned())
    }

    fn collection(&self, name: &str) -> Vec<ValueMap> {
        let store = self.store.read();
        self.buckets()
            .into_iter()
            .find_map(|bucket| store.collections.get(&(bucket, name.to_string())).cloned())
            .unwrap_or_default()
    }
}

impl ConfigurationBuilder for MemoryConfigurationBuilder {
    fn name(mut self: Box<Self>, name: &str) -> Box<dyn ConfigurationBuilder> {
        self.name = Some(name.to_string());
        self
    }

    fn as_value_map(&self) -> ResolveResult<ValueMap> {
        let name = self.required_name()?;
        Ok(self.single(name).unwrap_or_default())
    }

    fn as_schema(&self, ty: &ConfigType) -> ResolveResult<ConfigObject> {
        let name = self.schema_name(ty)?;
        ty.construct(&self.single(name).unwrap_or_default())
    }

    fn as_adaptable(&self, ty: &ConfigType) -> ResolveResult<Option<ConfigObject>> {
        let name = self.required_name()?;
        let Some(properties) = self.single(name) else {
            return Ok(None);
        };
        match ty.construct(&properties) {
            Ok(object) => Ok(Some(object)),
            Err(e) => {
                debug!(config_name = name, config_type = ty.type_name(), error = %e, "configuration not adaptable");
                Ok(None)
            }
        }
    }

    fn as_value_map_collection(&self) -> ResolveResult<Vec<ValueMap>> {
        let name = self.required_name()?;
        Ok(self.collection(name))
    }

    fn as_schema_collection(&self, ty: &ConfigType) -> ResolveResult<Vec<ConfigObject>> {
        let name = self.schema_name(ty)?;
        self.collection(name)
            .iter()
            .map(|properties| ty.construct(properties))
            .collect()
    }

    fn as_adaptable_collection(&self, ty: &ConfigType) -> ResolveResult<Vec<ConfigObject>> {
        let name = self.required_name()?;
        Ok(self
            .collection(name)
            .iter()
            .filter_map(|properties| match ty.construct(properties) {
                Ok(object) => Some(object),
                Err(e) => {
                    debug!(config_name = name, config_type = ty.type_name(), error = %e, "collection item not adaptable");
                    None
                }
            })
            .collect())
    }
}

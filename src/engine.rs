//! Interface of the configuration resolution engine.
//!
//! The engine owns path inheritance, caching and persistence. The injector
//! only asks it for a builder bound to a resource and reads values through
//! that builder.

use crate::config_type::{ConfigObject, ConfigType};
use crate::error::ResolveResult;
use crate::resource::Resource;
use crate::value_map::ValueMap;

/// Entry point of the configuration resolution engine.
pub trait ConfigurationResolver: Send + Sync {
    /// Returns a builder scoped to the given resource.
    fn get(&self, resource: &Resource) -> Box<dyn ConfigurationBuilder>;
}

/// Handle producing configuration values for one resource.
pub trait ConfigurationBuilder: Send {
    /// Narrows the builder to a named configuration.
    fn name(self: Box<Self>, name: &str) -> Box<dyn ConfigurationBuilder>;

    /// The configuration's raw properties.
    fn as_value_map(&self) -> ResolveResult<ValueMap>;

    /// The configuration mapped onto a schema type.
    fn as_schema(&self, ty: &ConfigType) -> ResolveResult<ConfigObject>;

    /// The configuration adapted to a plain type; `None` if no
    /// configuration exists or it cannot be adapted.
    fn as_adaptable(&self, ty: &ConfigType) -> ResolveResult<Option<ConfigObject>>;

    fn as_value_map_collection(&self) -> ResolveResult<Vec<ValueMap>>;

    fn as_schema_collection(&self, ty: &ConfigType) -> ResolveResult<Vec<ConfigObject>>;

    fn as_adaptable_collection(&self, ty: &ConfigType) -> ResolveResult<Vec<ConfigObject>>;
}

//! Shared fixture: a content tree with one configured site.
//!
//! `/content/region/site` references `/conf/region/site`, which holds a
//! single `SingleConfig` (`stringParam = value1`) and a `ListConfig`
//! collection (`item1`, `item2`). Models are resolved for
//! `/content/region/site/en`.

#![allow(dead_code)]

use std::sync::Arc;

use ferrous_caconfig::{
    AnnotatedElement, Annotation, ConfigurationResolver, ContextAwareConfiguration,
    ContextAwareConfigurationInjector, Configuration, MemoryConfigurationResolver, Resource,
    ResourceTree, ServiceRegistry, ValueMap, CONFIG_REF_PROPERTY,
};
use serde::Deserialize;

pub const SITE_PATH: &str = "/content/region/site";
pub const PAGE_PATH: &str = "/content/region/site/en";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SingleConfig {
    pub string_param: String,
    pub int_param: i32,
    pub bool_param: bool,
}

impl Configuration for SingleConfig {
    const NAME: &'static str = "app.caconfig.SingleConfig";
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ListConfig {
    pub string_param: String,
    pub int_param: i32,
}

impl Configuration for ListConfig {
    const NAME: &'static str = "app.caconfig.ListConfig";
}

/// Plain model adapted from a configuration's properties.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConfigurationValues {
    pub string_param: Option<String>,
    pub int_param: i32,
    pub bool_param: bool,
}

pub struct Fixture {
    pub tree: ResourceTree,
    pub engine: MemoryConfigurationResolver,
    pub registry: ServiceRegistry,
    pub page: Resource,
}

impl Fixture {
    pub fn new() -> Self {
        let tree = ResourceTree::new();
        tree.create(SITE_PATH, ValueMap::new().with(CONFIG_REF_PROPERTY, "/conf/region/site"));
        let page = tree.create(PAGE_PATH, ValueMap::new());

        let engine = MemoryConfigurationResolver::new(tree.clone());
        engine
            .write_schema::<SingleConfig>(SITE_PATH, ValueMap::new().with("stringParam", "value1"))
            .unwrap();
        engine
            .write_schema_collection::<ListConfig>(
                SITE_PATH,
                vec![
                    ValueMap::new().with("stringParam", "item1"),
                    ValueMap::new().with("stringParam", "item2"),
                ],
            )
            .unwrap();

        let registry = ServiceRegistry::new();
        registry.register_trait::<dyn ConfigurationResolver>(Arc::new(engine.clone()), 0);

        Self {
            tree,
            engine,
            registry,
            page,
        }
    }

    /// Injector wired from the registry as it is now.
    pub fn injector(&self) -> ContextAwareConfigurationInjector {
        ContextAwareConfigurationInjector::from_registry(&self.registry).unwrap()
    }
}

/// Field annotated for injection without an explicit name.
pub fn caconfig_field(name: &str) -> AnnotatedElement {
    AnnotatedElement::field(name)
        .with(Annotation::ContextAwareConfiguration(ContextAwareConfiguration::new()))
}

/// Field annotated for injection of a named configuration.
pub fn named_caconfig_field(name: &str, config_name: &str) -> AnnotatedElement {
    AnnotatedElement::field(name).with(Annotation::ContextAwareConfiguration(
        ContextAwareConfiguration::named(config_name),
    ))
}

//! # ferrous-caconfig
//!
//! Context-aware configuration injection for content models.
//!
//! A context-aware configuration is a configuration object scoped to a
//! location in a content hierarchy. Models declare injection points
//! annotated with [`ContextAwareConfiguration`]; the
//! [`ContextAwareConfigurationInjector`] resolves the configuration for the
//! model's resource and shapes it like the declared type.
//!
//! ## Features
//!
//! - **Type-directed dispatch**: single values, arrays, lists and collections
//! - **Three representations**: raw [`ValueMap`], configuration schemas, plain adapted types
//! - **Pluggable location detection**: ranked strategies can redirect requests
//! - **Ranked service registry**: wire collaborators and publish the injector
//! - **Reference engine**: in-memory content tree and configuration store
//!
//! ## Quick Start
//!
//! ```rust
//! use ferrous_caconfig::{
//!     Adaptable, AnnotatedElement, Annotation, ConfigType, Configuration, ConfigurationResolver,
//!     ContentRequest, ContextAwareConfiguration, ContextAwareConfigurationInjector, DeclaredType,
//!     Injector, MemoryConfigurationResolver, ResourceTree, ServiceRegistry, ValueMap,
//!     CONFIG_REF_PROPERTY,
//! };
//! use serde::Deserialize;
//! use std::sync::Arc;
//!
//! #[derive(Debug, Default, Deserialize)]
//! #[serde(default, rename_all = "camelCase")]
//! struct SiteConfig {
//!     site_name: String,
//! }
//!
//! impl Configuration for SiteConfig {
//!     const NAME: &'static str = "app.SiteConfig";
//! }
//!
//! // content and configuration
//! let tree = ResourceTree::new();
//! tree.create("/content/site", ValueMap::new().with(CONFIG_REF_PROPERTY, "/conf/site"));
//! let page = tree.create("/content/site/en", ValueMap::new());
//! let engine = MemoryConfigurationResolver::new(tree);
//! engine
//!     .write_schema::<SiteConfig>("/content/site", ValueMap::new().with("siteName", "Example"))
//!     .unwrap();
//!
//! // wiring
//! let registry = ServiceRegistry::new();
//! registry.register_trait::<dyn ConfigurationResolver>(Arc::new(engine), 0);
//! let injector = ContextAwareConfigurationInjector::from_registry(&registry).unwrap();
//!
//! // injection
//! let element = AnnotatedElement::field("config")
//!     .with(Annotation::ContextAwareConfiguration(ContextAwareConfiguration::new()));
//! let request = ContentRequest::new(page);
//! let value = injector
//!     .get_value(
//!         Adaptable::Request(&request),
//!         None,
//!         &DeclaredType::class(ConfigType::schema::<SiteConfig>()),
//!         &element,
//!     )
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(value.single::<SiteConfig>().unwrap().site_name, "Example");
//! ```

// Module declarations
pub mod adaptable;
pub mod annotation;
pub mod config_type;
pub mod declared;
pub mod detection;
pub mod engine;
pub mod error;
pub mod injector;
pub mod key;
pub mod memory;
pub mod options;
pub mod registry;
pub mod resource;
pub mod traits;
pub mod value_map;

// Re-export core types
pub use adaptable::Adaptable;
pub use annotation::{AnnotatedElement, Annotation, ContextAwareConfiguration, ElementKind, InjectionStrategy};
pub use config_type::{ConfigKind, ConfigObject, ConfigType, Configuration};
pub use declared::{DeclaredType, RawType, TypeShape};
pub use detection::{
    ConfigurationInjectResourceDetectionStrategy, RankedStrategyMultiplexer,
    ResourceDetectionStrategyMultiplexer,
};
pub use engine::{ConfigurationBuilder, ConfigurationResolver};
pub use error::{ConfigurationResolveError, DiError, DiResult, OptionsError, ResolveResult};
pub use injector::{
    AcceptsNullName, ContextAwareConfigurationInjector, ContextAwareConfigurationProcessor,
    InjectAnnotationProcessor, InjectedValue, Injector, StaticInjectAnnotationProcessorFactory,
    INJECTOR_NAME,
};
pub use key::{key_of_trait, key_of_type, Key};
pub use memory::MemoryConfigurationResolver;
pub use options::{InjectorOptions, DEFAULT_SERVICE_RANKING};
pub use registry::{ServiceId, ServiceReference, ServiceRegistry};
pub use resource::{ContentRequest, Request, Resource, ResourceTree, CONFIG_REF_PROPERTY};
pub use traits::{Resolver, ResolverCore};
pub use value_map::ValueMap;

//! Context-aware configuration injector.
//!
//! The host calls [`Injector::get_value`] for every injection point it
//! discovers. The injector derives the content resource from the
//! adaptable, asks the configuration engine for a builder scoped to that
//! resource and picks the retrieval operation from the declared type:
//!
//! | declared type | retrieval | result |
//! |---|---|---|
//! | class | single | [`InjectedValue::Single`] |
//! | array of class | collection | [`InjectedValue::Array`] |
//! | list of class | collection | [`InjectedValue::List`] |
//! | collection of class | collection | [`InjectedValue::Collection`] |
//!
//! Anything else is declined with `Ok(None)` so other injectors can try.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::adaptable::Adaptable;
use crate::annotation::{AnnotatedElement, ContextAwareConfiguration, InjectionStrategy};
use crate::config_type::{ConfigObject, ConfigType};
use crate::declared::{DeclaredType, TypeShape};
use crate::detection::{RankedStrategyMultiplexer, ResourceDetectionStrategyMultiplexer};
use crate::engine::{ConfigurationBuilder, ConfigurationResolver};
use crate::error::{DiError, DiResult, ResolveResult};
use crate::options::InjectorOptions;
use crate::registry::{ServiceReference, ServiceRegistry};
use crate::resource::Resource;
use crate::traits::Resolver;

/// Name the injector is registered under.
pub const INJECTOR_NAME: &str = "caconfig";

/// Value produced for an injection point, shaped like its declared type.
#[derive(Debug, Clone)]
pub enum InjectedValue {
    Single(ConfigObject),
    Array(Box<[ConfigObject]>),
    List(Vec<ConfigObject>),
    Collection(Vec<ConfigObject>),
}

impl InjectedValue {
    /// The produced objects in order; one element for single values.
    pub fn elements(&self) -> &[ConfigObject] {
        match self {
            InjectedValue::Single(object) => std::slice::from_ref(object),
            InjectedValue::Array(objects) => objects,
            InjectedValue::List(objects) | InjectedValue::Collection(objects) => objects,
        }
    }

    pub fn len(&self) -> usize {
        self.elements().len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements().is_empty()
    }

    pub fn is_single(&self) -> bool {
        matches!(self, InjectedValue::Single(_))
    }

    /// Downcasts a single value.
    pub fn single<T: Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        match self {
            InjectedValue::Single(object) => object.downcast::<T>(),
            _ => None,
        }
    }

    /// Downcasts every element of an array, list or collection.
    pub fn elements_as<T: Send + Sync + 'static>(&self) -> Option<Vec<Arc<T>>> {
        if self.is_single() {
            return None;
        }
        self.elements().iter().map(ConfigObject::downcast::<T>).collect()
    }
}

/// Injector SPI of the model host.
pub trait Injector: Send + Sync {
    /// Symbolic name used by the host to pick an injector.
    fn name(&self) -> &str;

    /// Produces the value for an injection point.
    ///
    /// `Ok(None)` declines: the injector does not apply to this element.
    fn get_value(
        &self,
        adaptable: Adaptable<'_>,
        name: Option<&str>,
        declared_type: &DeclaredType,
        element: &AnnotatedElement,
    ) -> ResolveResult<Option<InjectedValue>>;
}

/// Marker: the injector does not need the host to derive a name.
pub trait AcceptsNullName {}

/// Static properties of an injection point, derived from its annotation.
pub trait InjectAnnotationProcessor: Send + Sync {
    /// Name override for the injection, if any.
    fn name(&self) -> Option<&str> {
        None
    }

    fn via(&self) -> Option<&str> {
        None
    }

    fn has_default(&self) -> bool {
        false
    }

    fn injection_strategy(&self) -> InjectionStrategy;
}

/// Creates [`InjectAnnotationProcessor`]s for elements the injector handles.
pub trait StaticInjectAnnotationProcessorFactory: Send + Sync {
    fn create_annotation_processor(
        &self,
        element: &AnnotatedElement,
    ) -> Option<Box<dyn InjectAnnotationProcessor>>;
}

/// Processor backed by a [`ContextAwareConfiguration`] annotation.
#[derive(Debug, Clone)]
pub struct ContextAwareConfigurationProcessor {
    annotation: ContextAwareConfiguration,
}

impl ContextAwareConfigurationProcessor {
    pub fn new(annotation: ContextAwareConfiguration) -> Self {
        Self { annotation }
    }
}

impl InjectAnnotationProcessor for ContextAwareConfigurationProcessor {
    fn injection_strategy(&self) -> InjectionStrategy {
        self.annotation.injection_strategy
    }
}

/// Injects context-aware configurations into models.
///
/// # Examples
///
/// ```rust
/// use ferrous_caconfig::{
///     Adaptable, AnnotatedElement, Annotation, ConfigType, ContextAwareConfiguration,
///     ContextAwareConfigurationInjector, DeclaredType, Injector, MemoryConfigurationResolver,
///     RankedStrategyMultiplexer, ResourceTree, ServiceRegistry, ValueMap, CONFIG_REF_PROPERTY,
/// };
/// use std::sync::Arc;
///
/// let tree = ResourceTree::new();
/// tree.create("/content/site", ValueMap::new().with(CONFIG_REF_PROPERTY, "/conf/site"));
/// let page = tree.create("/content/site/en", ValueMap::new());
///
/// let engine = MemoryConfigurationResolver::new(tree);
/// engine
///     .write_configuration("/content/site", "app.Settings", ValueMap::new().with("title", "Site"))
///     .unwrap();
///
/// let injector = ContextAwareConfigurationInjector::new(
///     Arc::new(engine),
///     Arc::new(RankedStrategyMultiplexer::new(ServiceRegistry::new())),
/// );
///
/// let element = AnnotatedElement::field("settings").with(Annotation::ContextAwareConfiguration(
///     ContextAwareConfiguration::named("app.Settings"),
/// ));
/// let value = injector
///     .get_value(
///         Adaptable::Resource(&page),
///         None,
///         &DeclaredType::class(ConfigType::value_map()),
///         &element,
///     )
///     .unwrap()
///     .unwrap();
/// let settings = value.single::<ValueMap>().unwrap();
/// assert_eq!(settings.get::<String>("title").as_deref(), Some("Site"));
/// ```
#[derive(Clone)]
pub struct ContextAwareConfigurationInjector {
    configuration_resolver: Arc<dyn ConfigurationResolver>,
    detection: Arc<dyn ResourceDetectionStrategyMultiplexer>,
    options: InjectorOptions,
}

impl ContextAwareConfigurationInjector {
    pub fn new(
        configuration_resolver: Arc<dyn ConfigurationResolver>,
        detection: Arc<dyn ResourceDetectionStrategyMultiplexer>,
    ) -> Self {
        Self {
            configuration_resolver,
            detection,
            options: InjectorOptions::default(),
        }
    }

    /// Wires the injector from services published in `registry`.
    ///
    /// A [`ConfigurationResolver`] is required. The detection multiplexer
    /// is taken from the registry when one is published, otherwise a
    /// [`RankedStrategyMultiplexer`] over the same registry is used.
    pub fn from_registry(registry: &ServiceRegistry) -> DiResult<Self> {
        let configuration_resolver = registry.get_trait::<dyn ConfigurationResolver>()?;
        let detection = match registry.get_trait::<dyn ResourceDetectionStrategyMultiplexer>() {
            Err(DiError::NotFound(_)) => {
                Arc::new(RankedStrategyMultiplexer::new(registry.clone()))
                    as Arc<dyn ResourceDetectionStrategyMultiplexer>
            }
            detection => detection?,
        };
        Ok(Self::new(configuration_resolver, detection))
    }

    pub fn with_options(mut self, options: InjectorOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &InjectorOptions {
        &self.options
    }

    pub fn service_ranking(&self) -> i32 {
        self.options.service_ranking
    }

    /// Publishes the injector as `dyn Injector` and
    /// `dyn StaticInjectAnnotationProcessorFactory` at its service ranking.
    pub fn register_into(self, registry: &ServiceRegistry) -> [ServiceReference; 2] {
        let ranking = self.service_ranking();
        let injector = Arc::new(self);
        [
            registry.register_trait::<dyn Injector>(injector.clone(), ranking),
            registry.register_trait::<dyn StaticInjectAnnotationProcessorFactory>(injector, ranking),
        ]
    }

    /// Location used for configuration lookup, if the adaptable has one.
    pub fn resolve_resource(&self, adaptable: Adaptable<'_>) -> Option<Resource> {
        match adaptable {
            Adaptable::Resource(resource) => Some(resource.clone()),
            Adaptable::Request(request) => self
                .detection
                .detect_resource(request)
                .or_else(|| request.resource().cloned()),
            Adaptable::Other(_) => None,
        }
    }

    fn decline(&self, reason: &str, adaptable: Adaptable<'_>, declared_type: &DeclaredType) {
        if self.options.warn_on_decline {
            warn!(adaptable = adaptable.kind(), source = ?adaptable, declared_type = ?declared_type, "{}", reason);
        } else {
            debug!(adaptable = adaptable.kind(), source = ?adaptable, declared_type = ?declared_type, "{}", reason);
        }
    }
}

impl Injector for ContextAwareConfigurationInjector {
    fn name(&self) -> &str {
        INJECTOR_NAME
    }

    fn get_value(
        &self,
        adaptable: Adaptable<'_>,
        _name: Option<&str>,
        declared_type: &DeclaredType,
        element: &AnnotatedElement,
    ) -> ResolveResult<Option<InjectedValue>> {
        let Some(annotation) = element.context_aware_configuration() else {
            self.decline(
                "Injection only supported using the ContextAwareConfiguration annotation",
                adaptable,
                declared_type,
            );
            return Ok(None);
        };

        let Some(resource) = self.resolve_resource(adaptable) else {
            self.decline("Unable to get resource from adaptable", adaptable, declared_type);
            return Ok(None);
        };

        let mut builder = self.configuration_resolver.get(&resource);
        if let Some(name) = annotation.explicit_name() {
            builder = builder.name(name);
        }
        debug!(
            resource = resource.path(),
            element = element.name(),
            config_name = annotation.explicit_name(),
            "resolving configuration"
        );

        let value = match declared_type.shape() {
            TypeShape::Single(ty) => get_configuration(builder.as_ref(), &ty)?.map(InjectedValue::Single),
            TypeShape::ArrayOf(ty) => {
                let result = get_configuration_collection(builder.as_ref(), &ty)?;
                Some(InjectedValue::Array(result.into_boxed_slice()))
            }
            TypeShape::ListOf(ty) => {
                let result = get_configuration_collection(builder.as_ref(), &ty)?;
                Some(InjectedValue::List(result))
            }
            TypeShape::CollectionOf(ty) => {
                let result = get_configuration_collection(builder.as_ref(), &ty)?;
                Some(InjectedValue::Collection(result))
            }
            // wrong raw type or arity of a generic type declines without a log line
            TypeShape::Unsupported if matches!(declared_type, DeclaredType::Parameterized { .. }) => None,
            TypeShape::Unsupported => {
                self.decline("Cannot handle declared type", adaptable, declared_type);
                None
            }
        };
        Ok(value)
    }
}

impl AcceptsNullName for ContextAwareConfigurationInjector {}

impl StaticInjectAnnotationProcessorFactory for ContextAwareConfigurationInjector {
    fn create_annotation_processor(
        &self,
        element: &AnnotatedElement,
    ) -> Option<Box<dyn InjectAnnotationProcessor>> {
        element
            .context_aware_configuration()
            .map(|annotation| {
                Box::new(ContextAwareConfigurationProcessor::new(annotation.clone()))
                    as Box<dyn InjectAnnotationProcessor>
            })
    }
}

fn get_configuration(
    builder: &dyn ConfigurationBuilder,
    ty: &ConfigType,
) -> ResolveResult<Option<ConfigObject>> {
    let result = if ty.is_value_map() {
        builder.as_value_map().map(|map| Some(ConfigObject::new(map)))
    } else if ty.is_schema() {
        builder.as_schema(ty).map(Some)
    } else {
        builder.as_adaptable(ty)
    };
    result.map_err(|e| e.for_class(ty.type_name()))
}

fn get_configuration_collection(
    builder: &dyn ConfigurationBuilder,
    ty: &ConfigType,
) -> ResolveResult<Vec<ConfigObject>> {
    let result = if ty.is_value_map() {
        builder
            .as_value_map_collection()
            .map(|maps| maps.into_iter().map(ConfigObject::new).collect())
    } else if ty.is_schema() {
        builder.as_schema_collection(ty)
    } else {
        builder.as_adaptable_collection(ty)
    };
    result.map_err(|e| e.for_class(ty.type_name()))
}

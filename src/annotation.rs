//! Injection point metadata.
//!
//! The host normalizes whatever it discovers on a model's fields, methods
//! and constructor parameters into an [`AnnotatedElement`]; the injector
//! only ever reads this description.

use serde::{Deserialize, Serialize};

/// Whether an injection is mandatory.
///
/// With `Default` the host falls back to its own optional/required markers
/// and finally to the model's default strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InjectionStrategy {
    #[default]
    Default,
    Required,
    Optional,
}

/// Requests injection of a context-aware configuration.
///
/// For configuration collections, declare the injection point as an array,
/// a list or a collection.
///
/// ```rust
/// use ferrous_caconfig::{ContextAwareConfiguration, InjectionStrategy};
///
/// let annotation = ContextAwareConfiguration::named("app.ListConfig")
///     .with_strategy(InjectionStrategy::Optional);
/// assert_eq!(annotation.name, "app.ListConfig");
/// assert!(ContextAwareConfiguration::new().name.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextAwareConfiguration {
    /// Configuration name; optional when the target is a configuration
    /// schema, which carries an implicit name.
    pub name: String,
    pub injection_strategy: InjectionStrategy,
}

impl ContextAwareConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_strategy(mut self, injection_strategy: InjectionStrategy) -> Self {
        self.injection_strategy = injection_strategy;
        self
    }

    /// The configured name, `None` when blank.
    pub fn explicit_name(&self) -> Option<&str> {
        let name = self.name.trim();
        (!name.is_empty()).then_some(self.name.as_str())
    }
}

/// Annotations the host may report on an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Annotation {
    ContextAwareConfiguration(ContextAwareConfiguration),
    /// Generic injection marker without a specific source.
    Inject,
    Optional,
    Required,
    /// Any annotation this crate does not interpret.
    Other(String),
}

/// Kind of an injection point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Field,
    Method,
    Parameter,
}

/// Normalized description of an injection point.
///
/// ```rust
/// use ferrous_caconfig::{AnnotatedElement, Annotation, ContextAwareConfiguration, ElementKind};
///
/// let element = AnnotatedElement::field("config")
///     .with(Annotation::ContextAwareConfiguration(ContextAwareConfiguration::new()));
/// assert_eq!(element.kind(), ElementKind::Field);
/// assert!(element.context_aware_configuration().is_some());
///
/// let plain = AnnotatedElement::method("getConfig").with(Annotation::Inject);
/// assert!(plain.context_aware_configuration().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedElement {
    kind: ElementKind,
    name: String,
    annotations: Vec<Annotation>,
}

impl AnnotatedElement {
    pub fn new(kind: ElementKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            annotations: Vec::new(),
        }
    }

    pub fn field(name: impl Into<String>) -> Self {
        Self::new(ElementKind::Field, name)
    }

    pub fn method(name: impl Into<String>) -> Self {
        Self::new(ElementKind::Method, name)
    }

    pub fn parameter(name: impl Into<String>) -> Self {
        Self::new(ElementKind::Parameter, name)
    }

    /// Adds an annotation.
    pub fn with(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The context-aware configuration annotation, if present.
    pub fn context_aware_configuration(&self) -> Option<&ContextAwareConfiguration> {
        self.annotations.iter().find_map(|a| match a {
            Annotation::ContextAwareConfiguration(c) => Some(c),
            _ => None,
        })
    }
}

//! Error types for configuration injection and service lookup.

use thiserror::Error;

/// Service registry errors
///
/// Raised by [`Resolver`](crate::Resolver) lookups against a
/// [`ServiceRegistry`](crate::ServiceRegistry).
///
/// # Examples
///
/// ```rust
/// use ferrous_caconfig::{DiError, Resolver, ServiceRegistry};
///
/// let registry = ServiceRegistry::new();
/// match registry.get::<String>() {
///     Err(DiError::NotFound(type_name)) => {
///         assert_eq!(type_name, "alloc::string::String");
///     }
///     _ => unreachable!(),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiError {
    /// Service not registered
    #[error("Service not found: {0}")]
    NotFound(&'static str),
    /// Type downcast failed
    #[error("Type mismatch for: {0}")]
    TypeMismatch(&'static str),
}

/// Result type for service registry lookups
pub type DiResult<T> = Result<T, DiError>;

/// Failure raised when a configuration cannot be produced for a
/// structurally valid request.
///
/// The injector never swallows these: it re-wraps them with the requested
/// type name and keeps the underlying failure as [`source`](std::error::Error::source).
///
/// ```rust
/// use ferrous_caconfig::ConfigurationResolveError;
/// use std::error::Error;
///
/// let err = ConfigurationResolveError::new("Configuration name is required.")
///     .for_class("app::ListConfig");
/// assert_eq!(err.to_string(), "Class app::ListConfig: Configuration name is required.");
/// assert_eq!(err.source().unwrap().to_string(), "Configuration name is required.");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ConfigurationResolveError {
    message: String,
    #[source]
    cause: Option<Box<ConfigurationResolveError>>,
}

impl ConfigurationResolveError {
    /// Creates a root resolution failure.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            cause: None,
        }
    }

    /// Wraps this failure with the name of the class that was requested.
    pub fn for_class(self, type_name: &str) -> Self {
        Self {
            message: format!("Class {}: {}", type_name, self.message),
            cause: Some(Box::new(self)),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The wrapped failure, if any.
    pub fn cause(&self) -> Option<&ConfigurationResolveError> {
        self.cause.as_deref()
    }
}

/// Result type for configuration resolution
pub type ResolveResult<T> = Result<T, ConfigurationResolveError>;

/// Errors raised while loading [`InjectorOptions`](crate::InjectorOptions).
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("unable to read {}: {source}", path.display())]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid options document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: String, value: String },
}

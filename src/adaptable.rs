//! Objects a model can be adapted from.

use std::any::Any;
use std::fmt;

use crate::resource::{Request, Resource};

/// Source object of a model injection.
///
/// Only resources and requests carry a location; anything else is passed
/// through as [`Adaptable::Other`] and declined by the injector.
#[derive(Clone, Copy)]
pub enum Adaptable<'a> {
    Resource(&'a Resource),
    Request(&'a dyn Request),
    Other(&'a (dyn Any + Send + Sync)),
}

impl Adaptable<'_> {
    /// Short label used in log output.
    pub fn kind(&self) -> &'static str {
        match self {
            Adaptable::Resource(_) => "resource",
            Adaptable::Request(_) => "request",
            Adaptable::Other(_) => "other",
        }
    }
}

impl fmt::Debug for Adaptable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Adaptable::Resource(resource) => f.debug_tuple("Resource").field(&resource.path()).finish(),
            Adaptable::Request(request) => f
                .debug_tuple("Request")
                .field(&request.resource().map(Resource::path))
                .finish(),
            Adaptable::Other(_) => f.write_str("Other(..)"),
        }
    }
}

impl<'a> From<&'a Resource> for Adaptable<'a> {
    fn from(resource: &'a Resource) -> Self {
        Adaptable::Resource(resource)
    }
}

impl<'a, R: Request> From<&'a R> for Adaptable<'a> {
    fn from(request: &'a R) -> Self {
        Adaptable::Request(request)
    }
}
